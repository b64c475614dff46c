use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use vehicle_maintenance::config::{DatabaseConfig, EnvironmentConfig};
use vehicle_maintenance::database::DatabaseConnection;
use vehicle_maintenance::routes::create_router;
use vehicle_maintenance::services::gemini_client::{GeminiClient, SuggestionClient};
use vehicle_maintenance::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::default();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🔧 Vehicle Maintenance API");
    info!("==========================");

    // Inicializar base de datos
    let db_config = DatabaseConfig::new(&config.database_url);
    let db_connection = match DatabaseConnection::connect(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let suggestion_client = match GeminiClient::from_config(&config)? {
        Some(client) => {
            info!("🤖 AI suggestions enabled ({})", config.gemini_model);
            Some(Arc::new(client) as Arc<dyn SuggestionClient>)
        }
        None => {
            warn!("🤖 GEMINI_API_KEY not set; AI suggestions disabled");
            None
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(db_connection.pool().clone(), config, suggestion_client);
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("🚗 Vehículos:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   GET  /api/vehicles/:id/maintenance-types - Tipos aplicables");
    info!("   GET  /api/vehicles/:id/maintenance - Historial");
    info!("   GET  /api/vehicles/:id/upcoming - Próximos vencimientos");
    info!("🛠️ Mantenimiento:");
    info!("   POST /api/maintenance-types - Definir tipo de mantenimiento");
    info!("   POST /api/maintenance - Registrar mantenimiento");
    info!("   POST /api/mechanics - Registrar mecánico");
    info!("   GET  /api/mechanics - Listar mecánicos");
    info!("🤖 Sugerencias:");
    info!("   POST /api/suggestions - Intervalo o categoría sugeridos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
