pub mod categoria_repo;
pub use categoria_repo::CategoriaRepository;
pub mod produto_repo;
pub use produto_repo::ProdutoRepository;
pub mod fornecedor_repo;
pub use fornecedor_repo::FornecedorRepository;
pub mod estoque_repo;
pub use estoque_repo::EstoqueRepository;
pub mod nota_compra_repo;
pub use nota_compra_repo::NotaCompraRepository;
pub mod nota_venda_repo;
pub use nota_venda_repo::NotaVendaRepository;
pub mod gasto_repo;
pub use gasto_repo::GastoRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod relatorio_repo;
pub use relatorio_repo::RelatorioRepository;
