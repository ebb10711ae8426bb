use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use condominios_api::{
    build_app,
    config::EnvironmentConfig,
    database::DatabaseConnection,
    repositories::Repositories,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging; RUST_LOG tiene prioridad
    let is_production = std::env::var("ENVIRONMENT").map_or(false, |env| env == "production");
    let default_level = if is_production { "info" } else { "debug" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = EnvironmentConfig::from_env()?;

    info!("🏢 Condominios API");
    info!("==================");
    info!("🌍 Entorno: {}", config.environment);

    let repos = match &config.database {
        Some(db_config) => {
            let connection = match DatabaseConnection::connect(db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            connection.run_migrations().await?;
            Repositories::postgres(connection.pool().clone())
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida, usando almacenamiento en memoria");
            Repositories::memory()
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST/PORT inválidos")?;
    let server_url = config.server_url();

    let app = build_app(AppState::new(repos, config));

    info!("🌐 Servidor iniciando en {}", server_url);
    info!("🔍 Endpoints disponibles bajo /api:");
    info!("   /api/auth          - Autenticación y usuarios");
    info!("   /api/anuncios      - Anuncios");
    info!("   /api/reservaciones - Reservaciones de áreas comunes");
    info!("   /api/pagos         - Pagos");
    info!("   /api/visitantes    - Visitantes");
    info!("   /api/mensajes      - Mensajería");
    info!("   /api/encuestas     - Encuestas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
