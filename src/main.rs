use anyhow::Result;
use cnexporter::*;
use prometheus::Registry;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        port = app_config.server.port,
        poll_interval_secs = app_config.monitoring.poll_interval_secs,
        "Publishing container metrics on /metrics"
    );

    let docker_repo: Arc<dyn source::SnapshotSource> =
        Arc::new(docker_repo::DockerRepo::connect()?);
    let host: Arc<dyn source::HostIdentity> = Arc::new(host::SysinfoHost);

    let registry = Registry::new();
    let count_gauges = Arc::new(metrics::CountGauges::register(&registry)?);
    let metadata_gauge = Arc::new(metrics::MetadataGauge::register(&registry)?);

    let cycle_config = worker::CycleConfig {
        poll_interval_secs: app_config.monitoring.poll_interval_secs,
        include_stopped: app_config.monitoring.include_stopped,
    };

    let (counts_shutdown_tx, counts_shutdown_rx) = tokio::sync::oneshot::channel();
    let (metadata_shutdown_tx, metadata_shutdown_rx) = tokio::sync::oneshot::channel();

    let counts_handle = worker::spawn_counts(
        worker::CycleDeps {
            source: docker_repo.clone(),
            host: host.clone(),
            shutdown_rx: counts_shutdown_rx,
        },
        count_gauges,
        cycle_config.clone(),
    );
    let metadata_handle = worker::spawn_metadata(
        worker::CycleDeps {
            source: docker_repo,
            host,
            shutdown_rx: metadata_shutdown_rx,
        },
        metadata_gauge,
        cycle_config,
    );

    let app = routes::app(registry);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    let in_container = std::path::Path::new("/.dockerenv").exists()
        || std::env::var("CONTAINER").as_deref() == Ok("1");

    if in_container {
        // In Docker: run server until error or SIGTERM (no signal handler; avoids immediate exit)
        axum::serve(listener, app).await?;
    } else {
        tokio::select! {
            result = axum::serve(listener, app) => {
                result?;
            }
            _ = async {
                #[cfg(unix)]
                {
                    let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                        Ok(s) => s,
                        Err(_) => {
                            let _ = tokio::signal::ctrl_c().await;
                            return;
                        }
                    };
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = sigterm.recv() => {}
                    }
                }
                #[cfg(not(unix))]
                {
                    tokio::signal::ctrl_c().await
                }
            } => {
                tracing::info!("Received shutdown signal");
                let _ = counts_shutdown_tx.send(());
                let _ = metadata_shutdown_tx.send(());
                let _ = counts_handle.await;
                let _ = metadata_handle.await;
            }
        }
    }

    Ok(())
}
