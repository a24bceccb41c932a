use dotenvy::dotenv;

use mergington_api::db::{run_migrations, seed_activities};
use mergington_api::logging::init_tracing;
use mergington_api::router::init_router;
use mergington_api::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_tracing();

    let state = init_app_state().await;
    run_migrations(&state.db)
        .await
        .expect("Failed to run database migrations");
    seed_activities(&state.db)
        .await
        .expect("Failed to seed activity catalog");

    let app = init_router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap();
    println!("🚀 Server running on http://localhost:{port}");
    println!("📚 Swagger UI available at http://localhost:{port}/swagger-ui");
    axum::serve(listener, app).await.unwrap();
}
