use carshare_gateway::config::Config;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn configured(value: Option<&String>) -> &'static str {
    if value.is_some() { "set" } else { "<none>" }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &carshare_gateway::config::CONFIG;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        backend_url = %cfg.backend.url.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        anon_key = configured(cfg.backend.anon_key.as_ref()),
        service_role_key = configured(cfg.backend.service_role_key.as_ref()),
        payments_key = configured(cfg.payments.secret_key.as_ref()),
        bootstrap_email = configured(cfg.admin.bootstrap_email.as_ref()),
        loglevel = %cfg.basic.loglevel,
    );
    if !cfg.backend.is_live() {
        warn!("backend is unconfigured; data routes will answer 500");
    }

    let state = carshare_gateway::GatewayState::new(Config::clone(cfg))?;
    let app = carshare_gateway::gateway_router(state);

    let addr = cfg.basic.listen_addr;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
