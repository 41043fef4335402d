//! Toggle API server.
//!
//! ```sh
//! RUST_LOG=info DEVFLOW_ADDR=127.0.0.1:3000 DEVFLOW_SEED_PATH=seed.json devflow-server
//! ```
//!
//! The seed file is a JSON list of targets:
//! `[{ "targetType": "question", "targetId": "q1", "upvoteCount": 5, "downvoteCount": 2 }]`.

use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

use devflow::{handlers, microsvc, Config, InMemoryReadModelStore, Target, TargetKind, ToggleService};
use serde::Deserialize;
use tokio::signal::ctrl_c;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedTarget {
    target_type: TargetKind,
    target_id: String,
    #[serde(default)]
    upvote_count: u64,
    #[serde(default)]
    downvote_count: u64,
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load();

    let toggles = ToggleService::from_config(InMemoryReadModelStore::new(), &config);
    if let Some(path) = &config.seed_path {
        seed(&toggles, path);
    }

    let service = Arc::new(handlers::service(toggles));
    info!("Registered commands: {:?}", service.commands());

    if let Err(e) = microsvc::serve_with_shutdown(service, &config.addr, shutdown_signal()).await {
        error!("Server error on {}: {e}", config.addr);
        std::process::exit(1);
    }

    info!("Server shut down");
}

fn seed(toggles: &ToggleService<InMemoryReadModelStore>, path: &Path) {
    let targets: Vec<SeedTarget> = match read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(targets) => targets,
        Err(e) => {
            warn!("Failed to read seed file {}: {e}", path.display());
            return;
        }
    };

    let mut registered = 0;
    for entry in targets {
        let target = Target::with_counts(
            entry.target_type,
            entry.target_id,
            entry.upvote_count,
            entry.downvote_count,
        );
        match toggles.register_target(&target) {
            Ok(()) => registered += 1,
            Err(e) => warn!("Skipping seed target {}: {e}", target.key),
        }
    }
    info!("Seeded {registered} targets from {}", path.display());
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
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
}
