use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use funnel::model::IceServerConfig;
use funnel::server::{
    DEFAULT_DEVICE_NAME, DEFAULT_STUN_SERVER, DeviceRegistry, IngestConfig, PeerEvent,
    PeerHostSession, RtcSignalingChannel, Settings, StaticHost, WhipDevice, WhipError, router,
};

#[derive(Parser)]
#[command(name = "funnel", version, about = "WHIP ingestion endpoint for WebRTC cameras")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve one WHIP camera device over HTTP
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    #[arg(long, env = "FUNNEL_BIND", default_value = "0.0.0.0:11080")]
    bind: SocketAddr,

    /// Address cameras use to reach this server
    #[arg(long, env = "FUNNEL_PUBLIC_IP", default_value = "127.0.0.1")]
    public_ip: String,

    #[arg(long, env = "FUNNEL_HTTPS_PORT", default_value_t = 10443)]
    https_port: u16,

    #[arg(long, env = "FUNNEL_DEVICE_NAME", default_value = DEFAULT_DEVICE_NAME)]
    name: String,

    #[arg(long, env = "FUNNEL_OFFER_TIMEOUT_SECS", default_value_t = 60)]
    offer_timeout_secs: u64,

    #[arg(long, env = "FUNNEL_ANSWER_TIMEOUT_MS", default_value_t = 1000)]
    answer_timeout_ms: u64,

    /// Upper bound on ICE gathering before the answer is sent; keep it below the answer timeout
    #[arg(long, env = "FUNNEL_ICE_GATHER_TIMEOUT_MS", default_value_t = 700)]
    ice_gather_timeout_ms: u64,

    #[arg(long = "stun", env = "FUNNEL_STUN", value_delimiter = ',', default_value = DEFAULT_STUN_SERVER)]
    stun: Vec<String>,
}

impl ServeArgs {
    fn ingest_config(&self) -> IngestConfig {
        IngestConfig::default()
            .with_offer_timeout(Duration::from_secs(self.offer_timeout_secs))
            .with_answer_timeout(Duration::from_millis(self.answer_timeout_ms))
            .with_ice_servers(self.stun.iter().map(IceServerConfig::stun).collect())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    println!("{}", "🚀 Starting Funnel WHIP endpoint...".green().bold());

    let host = StaticHost {
        ip: args.public_ip.clone(),
        http_port: args.bind.port(),
        https_port: args.https_port,
    };
    let devices = DeviceRegistry::new(args.ingest_config(), Arc::new(host));

    let settings = HashMap::from([("name".to_owned(), args.name.clone())]);
    let device_id = devices
        .create_device(&settings)
        .await
        .context("Failed to create camera device")?;
    let device = devices
        .find_device(&device_id)
        .context("Created device is missing from the registry")?;

    println!("   📷 {}", device.name().cyan());
    for setting in device.get_settings().await? {
        println!(
            "   {} {}",
            format!("{}:", setting.title).cyan(),
            setting.value.unwrap_or_default()
        );
    }

    let gather_timeout = Duration::from_millis(args.ice_gather_timeout_ms);
    if args.ice_gather_timeout_ms >= args.answer_timeout_ms {
        warn!(
            "ICE gather timeout {:?} is not below the answer timeout, ingest requests may time out",
            gather_timeout
        );
    }
    tokio::spawn(keep_armed(device, gather_timeout));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(devices.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("WHIP endpoint listening on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    devices.release_device(&device_id);
    println!("{}", "✨ Stopped".green().bold());
    Ok(())
}

/// Держит у устройства одну взведенную сигнальную сессию и взводит новую
/// после каждого исхода, пока устройство не удалят.
async fn keep_armed(device: Arc<WhipDevice>, gather_timeout: Duration) {
    loop {
        let (event_tx, event_rx) = mpsc::channel(32);
        let session = Arc::new(
            PeerHostSession::new(device.id().clone(), event_tx).with_gather_timeout(gather_timeout),
        );

        match device.start_rtc_signaling_session(session.as_ref()).await {
            Ok(_control) => {
                tokio::spawn(watch_peer(session, event_rx));
            }
            Err(WhipError::Timeout(_)) => {
                debug!("No camera for {} yet, re-arming", device.id());
            }
            Err(WhipError::Closed(_)) => {
                info!("Device {} released, signaling stopped", device.id());
                break;
            }
            Err(e) => {
                warn!("Signaling session for {} failed: {}", device.id(), e);
                if let Err(e) = session.close().await {
                    warn!("Failed to close peer connection: {:?}", e);
                }
            }
        }
    }
}

async fn watch_peer(session: Arc<PeerHostSession>, mut events: mpsc::Receiver<PeerEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            PeerEvent::TrackReceived {
                device_id,
                kind,
                codec,
            } => info!("{}: receiving {} track ({})", device_id, kind, codec),
            PeerEvent::MediaFlowing { device_id, kind } => {
                info!("{}: {} media flowing", device_id, kind)
            }
            PeerEvent::Disconnected(device_id) => {
                info!("{}: camera disconnected", device_id);
                break;
            }
        }
    }

    if let Err(e) = session.close().await {
        warn!("Failed to close peer connection: {:?}", e);
    }
}
