// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Categoria ---
        handlers::categoria::create,
        handlers::categoria::update,
        handlers::categoria::delete,
        handlers::categoria::find_all,
        handlers::categoria::find_by_id,
        handlers::categoria::find_per_page,

        // --- Produto ---
        handlers::produto::create,
        handlers::produto::update,
        handlers::produto::delete,
        handlers::produto::find_all,
        handlers::produto::find_by_id,
        handlers::produto::find_per_page,

        // --- Fornecedor ---
        handlers::fornecedor::create,
        handlers::fornecedor::update,
        handlers::fornecedor::delete,
        handlers::fornecedor::find_all,
        handlers::fornecedor::find_by_id,
        handlers::fornecedor::find_per_page,

        // --- Estoque ---
        handlers::estoque::create,
        handlers::estoque::update,
        handlers::estoque::delete,
        handlers::estoque::find_all,
        handlers::estoque::find_by_id,
        handlers::estoque::find_per_page,

        // --- Notas fiscais ---
        handlers::nota_compra::create,
        handlers::nota_compra::update,
        handlers::nota_compra::delete,
        handlers::nota_compra::find_all,
        handlers::nota_compra::find_by_id,
        handlers::nota_compra::find_per_page,
        handlers::nota_venda::create,
        handlers::nota_venda::update,
        handlers::nota_venda::delete,
        handlers::nota_venda::find_all,
        handlers::nota_venda::find_by_id,
        handlers::nota_venda::find_per_page,

        // --- Gasto ---
        handlers::gasto::create,
        handlers::gasto::update,
        handlers::gasto::delete,
        handlers::gasto::find_all,
        handlers::gasto::find_by_id,
        handlers::gasto::find_per_page,

        // --- User ---
        handlers::user::create,
        handlers::user::update,
        handlers::user::find_all,
        handlers::user::find_by_id,
        handlers::user::find_by_email,
        handlers::user::find_per_page,

        // --- Relatorio ---
        handlers::relatorio::resumo_geral,
        handlers::relatorio::vendas,
        handlers::relatorio::estoque,
        handlers::relatorio::compras,
        handlers::relatorio::consolidado,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::catalogo::TipoProduto,
            models::catalogo::Categoria,
            models::catalogo::Produto,
            handlers::categoria::CreateCategoriaPayload,
            handlers::categoria::UpdateCategoriaPayload,
            handlers::produto::CreateProdutoPayload,
            handlers::produto::UpdateProdutoPayload,

            // --- Fornecedor ---
            models::fornecedor::Fornecedor,
            handlers::fornecedor::CreateFornecedorPayload,
            handlers::fornecedor::UpdateFornecedorPayload,

            // --- Estoque ---
            models::estoque::UnidadeMedida,
            models::estoque::ProdutoEstoque,
            handlers::estoque::CreateEstoquePayload,
            handlers::estoque::UpdateEstoquePayload,

            // --- Notas fiscais ---
            models::notas::NotaFiscalCompra,
            models::notas::ProdutoCompra,
            models::notas::NotaFiscalCompraDetalhe,
            models::notas::NotaFiscalVenda,
            models::notas::ProdutoVenda,
            models::notas::NotaFiscalVendaDetalhe,
            handlers::nota_compra::CreateNotaCompraPayload,
            handlers::nota_compra::UpdateNotaCompraPayload,
            handlers::nota_compra::ProdutoCompraPayload,
            handlers::nota_venda::CreateNotaVendaPayload,
            handlers::nota_venda::UpdateNotaVendaPayload,
            handlers::nota_venda::ProdutoVendaPayload,

            // --- Gasto ---
            models::gasto::GastoDiario,
            handlers::gasto::CreateGastoPayload,
            handlers::gasto::UpdateGastoPayload,

            // --- User ---
            models::user::User,
            handlers::user::CreateUserPayload,
            handlers::user::UpdateUserPayload,

            // --- Relatorio ---
            models::relatorio::ResumoGeral,
            models::relatorio::VendaPeriodo,
            models::relatorio::TotaisPeriodo,
            models::relatorio::ComparativoPeriodos,
            models::relatorio::ProdutoMaisVendido,
            models::relatorio::VendaCategoria,
            models::relatorio::MargemProduto,
            models::relatorio::PosicaoEstoque,
            models::relatorio::ClasseAbc,
            models::relatorio::CurvaAbcItem,
            models::relatorio::GiroProduto,
            models::relatorio::ProdutoBaixoEstoque,
            models::relatorio::ProdutoSemGiro,
            models::relatorio::ProdutoValidade,
            models::relatorio::CompraHistorico,
            models::relatorio::ComprasFornecedor,
            models::relatorio::CustoAquisicao,
            models::relatorio::CoberturaEstoque,
            models::relatorio::NecessidadeCompra,
            models::relatorio::LucratividadeCategoria,
            models::relatorio::RupturaEstoque,
        )
    ),
    tags(
        (name = "Categoria", description = "Categorias de produto"),
        (name = "Produto", description = "Catálogo de produtos"),
        (name = "Fornecedor", description = "Cadastro de fornecedores"),
        (name = "Estoque", description = "Lotes de estoque por produto"),
        (name = "Nota fiscal de compra", description = "Notas de entrada com linhas de produto"),
        (name = "Nota fiscal de venda", description = "Notas de saída com linhas de produto"),
        (name = "Gasto", description = "Gastos diários avulsos"),
        (name = "User", description = "Usuários do sistema"),
        (name = "Relatorio", description = "Relatórios agregados de vendas, estoque e compras")
    )
)]
pub struct ApiDoc;
