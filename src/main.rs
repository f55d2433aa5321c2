//src/main.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let categoria_routes = Router::new()
        .route("/create", post(handlers::categoria::create))
        .route("/update/{id}", put(handlers::categoria::update))
        .route("/delete/{id}", delete(handlers::categoria::delete))
        .route("/findAll", get(handlers::categoria::find_all))
        .route("/findById/{id}", get(handlers::categoria::find_by_id))
        .route("/findPerPage", get(handlers::categoria::find_per_page));

    let produto_routes = Router::new()
        .route("/create", post(handlers::produto::create))
        .route("/update/{id}", put(handlers::produto::update))
        .route("/delete/{id}", delete(handlers::produto::delete))
        .route("/findAll", get(handlers::produto::find_all))
        .route("/findById/{id}", get(handlers::produto::find_by_id))
        .route("/findPerPage", get(handlers::produto::find_per_page));

    let fornecedor_routes = Router::new()
        .route("/create", post(handlers::fornecedor::create))
        .route("/update/{id}", put(handlers::fornecedor::update))
        .route("/delete/{id}", delete(handlers::fornecedor::delete))
        .route("/findAll", get(handlers::fornecedor::find_all))
        .route("/findById/{id}", get(handlers::fornecedor::find_by_id))
        .route("/findPerPage", get(handlers::fornecedor::find_per_page));

    let estoque_routes = Router::new()
        .route("/create", post(handlers::estoque::create))
        .route("/update/{id}", put(handlers::estoque::update))
        .route("/delete/{id}", delete(handlers::estoque::delete))
        .route("/findAll", get(handlers::estoque::find_all))
        .route("/findById/{id}", get(handlers::estoque::find_by_id))
        .route("/findPerPage", get(handlers::estoque::find_per_page));

    let nota_compra_routes = Router::new()
        .route("/create", post(handlers::nota_compra::create))
        .route("/update/{id}", put(handlers::nota_compra::update))
        .route("/delete/{id}", delete(handlers::nota_compra::delete))
        .route("/findAll", get(handlers::nota_compra::find_all))
        .route("/findById/{id}", get(handlers::nota_compra::find_by_id))
        .route("/findPerPage", get(handlers::nota_compra::find_per_page));

    let nota_venda_routes = Router::new()
        .route("/create", post(handlers::nota_venda::create))
        .route("/update/{id}", put(handlers::nota_venda::update))
        .route("/delete/{id}", delete(handlers::nota_venda::delete))
        .route("/findAll", get(handlers::nota_venda::find_all))
        .route("/findById/{id}", get(handlers::nota_venda::find_by_id))
        .route("/findPerPage", get(handlers::nota_venda::find_per_page));

    let gasto_routes = Router::new()
        .route("/create", post(handlers::gasto::create))
        .route("/update/{id}", put(handlers::gasto::update))
        .route("/delete/{id}", delete(handlers::gasto::delete))
        .route("/findAll", get(handlers::gasto::find_all))
        .route("/findById/{id}", get(handlers::gasto::find_by_id))
        .route("/findPerPage", get(handlers::gasto::find_per_page));

    // Usuário não tem rota de remoção.
    let user_routes = Router::new()
        .route("/create", post(handlers::user::create))
        .route("/update/{id}", put(handlers::user::update))
        .route("/findAll", get(handlers::user::find_all))
        .route("/findById/{id}", get(handlers::user::find_by_id))
        .route("/findByEmail", get(handlers::user::find_by_email))
        .route("/findPerPage", get(handlers::user::find_per_page));

    let relatorio_routes = Router::new()
        .route("/vendas", get(handlers::relatorio::vendas))
        .route("/estoque", get(handlers::relatorio::estoque))
        .route("/compras", get(handlers::relatorio::compras))
        .route("/consolidado", get(handlers::relatorio::consolidado));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/relatorio", get(handlers::relatorio::resumo_geral))
        .nest("/api/categoria", categoria_routes)
        .nest("/api/produto", produto_routes)
        .nest("/api/fornecedor", fornecedor_routes)
        .nest("/api/estoque", estoque_routes)
        .nest("/api/nota-fiscal-compra", nota_compra_routes)
        .nest("/api/nota-fiscal-venda", nota_venda_routes)
        .nest("/api/gasto", gasto_routes)
        .nest("/api/user", user_routes)
        .nest("/api/relatorio", relatorio_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
