pub mod notas_service;
pub use notas_service::NotasService;
pub mod relatorio_service;
pub use relatorio_service::RelatorioService;
