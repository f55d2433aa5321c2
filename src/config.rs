// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CategoriaRepository, EstoqueRepository, FornecedorRepository, GastoRepository,
        NotaCompraRepository, NotaVendaRepository, ProdutoRepository, RelatorioRepository,
        UserRepository,
    },
    services::{NotasService, RelatorioService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub categorias: CategoriaRepository,
    pub produtos: ProdutoRepository,
    pub fornecedores: FornecedorRepository,
    pub estoque: EstoqueRepository,
    pub notas_compra: NotaCompraRepository,
    pub notas_venda: NotaVendaRepository,
    pub gastos: GastoRepository,
    pub users: UserRepository,
    pub notas: NotasService,
    pub relatorio: RelatorioService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let notas_compra = NotaCompraRepository::new(db_pool.clone());
        let notas_venda = NotaVendaRepository::new(db_pool.clone());
        let notas = NotasService::new(db_pool.clone(), notas_venda.clone(), notas_compra.clone());
        let relatorio = RelatorioService::new(RelatorioRepository::new(db_pool.clone()));

        Ok(Self {
            categorias: CategoriaRepository::new(db_pool.clone()),
            produtos: ProdutoRepository::new(db_pool.clone()),
            fornecedores: FornecedorRepository::new(db_pool.clone()),
            estoque: EstoqueRepository::new(db_pool.clone()),
            gastos: GastoRepository::new(db_pool.clone()),
            users: UserRepository::new(db_pool.clone()),
            notas_compra,
            notas_venda,
            notas,
            relatorio,
            db_pool,
        })
    }
}
