pub mod catalogo;
pub mod estoque;
pub mod fornecedor;
pub mod gasto;
pub mod notas;
pub mod relatorio;
pub mod user;
