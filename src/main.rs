//src/main.rs

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use faturamento::{
    config::{AppState, Settings},
    db::MemoryDocumentStore,
    routes::build_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG controla o nível, padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let bind_addr = settings.bind_addr.clone();

    let app_state = if settings.database_url.is_some() {
        let (app_state, db_pool) = AppState::new(settings).await?;

        // Faz o app rodar as migrações do SQLx na inicialização
        sqlx::migrate!().run(&db_pool).await?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        app_state
    } else {
        tracing::warn!("DATABASE_URL não definida: usando armazenamento em memória (dados se perdem ao reiniciar)");
        AppState::with_store(Arc::new(MemoryDocumentStore::new()), settings)
    };

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
