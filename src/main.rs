use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use carwash_backend::config::database::DatabaseConfig;
use carwash_backend::config::environment::EnvironmentConfig;
use carwash_backend::create_app_router;
use carwash_backend::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use carwash_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚿 Car Wash Manager - API de gestión de lavados");
    info!("===============================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = match db_config.create_pool().await {
        Ok(pool) => {
            info!("✅ PostgreSQL conectado exitosamente");
            pool
        }
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // En producción CORS se restringe a los orígenes configurados
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);

    let app = create_app_router().layer(cors).with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🧼 Endpoints - Lavados:");
    info!("   POST /api/wash-job - Registrar llegada");
    info!("   GET  /api/wash-job/today - Fila del día con conteos");
    info!("   GET  /api/wash-job/:id - Obtener lavado");
    info!("   PUT  /api/wash-job/:id - Editar lavado");
    info!("   DELETE /api/wash-job/:id - Eliminar lavado");
    info!("   POST /api/wash-job/:id/enter-bay - Mover a pista");
    info!("   POST /api/wash-job/:id/complete - Finalizar lavado");
    info!("🚗 Endpoints - Vehículos:");
    info!("   POST /api/vehicle - Registrar vehículo");
    info!("   GET  /api/vehicle/search - Buscar por matrícula o dueño");
    info!("   GET  /api/vehicle/:id - Detalles con historial");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("👷 Endpoints - Colaboradores:");
    info!("   POST /api/staff - Registrar colaborador");
    info!("   GET  /api/staff - Listar colaboradores");
    info!("   PUT  /api/staff/:id - Actualizar colaborador");
    info!("📊 Endpoints - Dashboard:");
    info!("   GET  /api/dashboard/summary - Indicadores del período");
    info!("   GET  /api/dashboard/export-csv - Export CSV de lavados");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
