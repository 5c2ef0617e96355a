//! wakeplay - remote trigger that wakes a paired Bluetooth speaker and makes
//! sure music is playing.

mod advertise;
mod config;
mod logging;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use wakeplay_client::{OrchestratorBuilder, Platform, SystemSetup};

use config::{BluetoothBackend, Config};

#[derive(Parser, Debug)]
#[command(name = "wakeplay", version, about = "Wake a Bluetooth speaker and start playback on trigger")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = "wakeplay.toml")]
    config: PathBuf,

    /// Override `server.bind`
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Override `device.name`
    #[arg(long)]
    device: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    debug: bool,

    /// Run once, print the report as JSON and exit
    #[arg(long)]
    once: bool,

    /// Skip the mDNS announcement
    #[arg(long)]
    no_advertise: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = logging::setup_logging(args.debug, args.log_file.as_deref())?;

    let mut cfg = Config::load_or_default(&args.config)?;
    if let Some(bind) = args.bind {
        cfg.server.bind = bind;
    }
    if let Some(device) = args.device {
        cfg.device.name = device;
    }
    cfg.validate();

    let setup = SystemSetup::check().await;
    info!("System setup: {}", setup.summary());
    for issue in &setup.issues {
        match &issue.fix_command {
            Some(fix) => warn!("{} (fix: {})", issue.description, fix),
            None => warn!("{}", issue.description),
        }
    }

    let platform = build_platform(&cfg).await?;
    let orchestrator = Arc::new(
        OrchestratorBuilder::new(platform)
            .settings(cfg.run_settings())
            .build(),
    );

    if args.once {
        let report = orchestrator.run_launch_and_play().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let advertiser = if cfg.server.advertise && !args.no_advertise {
        advertise::advertise(cfg.server.bind)
    } else {
        None
    };

    let result = server::serve(cfg.server.bind, orchestrator).await;

    if let Some(advertiser) = advertiser {
        advertiser.shutdown();
    }
    result
}

async fn build_platform(cfg: &Config) -> Result<Platform> {
    let platform = match cfg.backend.bluetooth {
        BluetoothBackend::Bluetoothctl => command_line(cfg),
        BluetoothBackend::Bluez => bluez(cfg).await?,
    };

    if cfg.run_settings().audio.is_noop() {
        Ok(platform.without_audio())
    } else {
        Ok(platform)
    }
}

fn command_line(cfg: &Config) -> Platform {
    match &cfg.audio.sound_file {
        Some(path) => Platform::command_line_with_sound(path),
        None => Platform::command_line(),
    }
}

#[cfg(all(feature = "bluez", target_os = "linux"))]
async fn bluez(cfg: &Config) -> Result<Platform> {
    let sound_file = cfg
        .audio
        .sound_file
        .clone()
        .unwrap_or_else(|| wakeplay_client::DEFAULT_SOUND_FILE.to_string());
    Ok(Platform::bluez_with_sound(sound_file).await?)
}

#[cfg(not(all(feature = "bluez", target_os = "linux")))]
async fn bluez(cfg: &Config) -> Result<Platform> {
    warn!("Built without the `bluez` feature, using bluetoothctl");
    Ok(command_line(cfg))
}
