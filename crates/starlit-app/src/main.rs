//! The binary entry point for the Starlit host.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use starlit_app::platform::{PlatformDirs, PlatformError};
use starlit_app::{AssetError, DiskAssets, FrameLoop, HeadlessRenderer, LoggingAudio};
use starlit_config::{CliArgs, Config};
use starlit_log::{LogSettings, init_logging};
use starlit_scene::{EngineSettings, SceneEngine, asset_channel};
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    let dirs = match resolve_dirs(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            std::process::exit(1);
        }
    };

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    let log_settings = LogSettings::resolve(
        Some(&config),
        Some(&dirs.log_dir),
        cfg!(debug_assertions),
    );
    if let Err(e) = init_logging(&log_settings) {
        eprintln!("Logging unavailable: {e}");
    }

    info!(
        config = %dirs.config_dir.display(),
        data = %dirs.data_dir.display(),
        logs = %dirs.log_dir.display(),
        "Starlit starting"
    );

    if let Err(e) = run(&config, &dirs) {
        eprintln!("Starlit failed: {e}");
        std::process::exit(1);
    }
}

fn resolve_dirs(config_override: Option<&Path>) -> Result<PlatformDirs, PlatformError> {
    let mut dirs = PlatformDirs::resolve()?;
    if let Some(path) = config_override {
        dirs.config_dir = path.to_path_buf();
    }
    dirs.create_dirs()?;
    Ok(dirs)
}

fn run(config: &Config, dirs: &PlatformDirs) -> Result<(), AssetError> {
    let seed = config.session.seed.unwrap_or_else(clock_seed);
    let (events_tx, events_rx) = asset_channel();
    let assets = DiskAssets::with_defaults(&dirs.data_dir, events_tx)?;
    let renderer = HeadlessRenderer::new(
        config.window.width,
        config.window.height,
        config.debug.frame_summary_interval,
    );

    let settings = EngineSettings {
        seed,
        aspect: config.window.aspect(),
        image_paths: config.assets.image_paths.clone(),
        font_url: config.assets.font_path.clone(),
        audio_url: config.assets.audio_url.clone(),
    };
    let mut engine = SceneEngine::new(settings, renderer, assets, LoggingAudio::new(), events_rx);

    let click_at = config.session.click_at_frame;
    let center = (
        config.window.width as f32 / 2.0,
        config.window.height as f32 / 2.0,
    );
    let mut frame_loop = FrameLoop::new(config.session.target_fps);

    loop {
        if config
            .session
            .max_frames
            .is_some_and(|max| engine.frame_count() >= max)
        {
            break;
        }
        let ran = frame_loop.tick(|frame, elapsed| {
            if click_at == Some(frame) && !engine.click(center.0, center.1) {
                info!(frame, "Scripted click did not start the intro");
            }
            engine.frame(elapsed);
        });
        if !ran {
            std::thread::sleep(frame_loop.until_next_frame());
        }
    }

    info!(
        frames = engine.frame_count(),
        rendered = engine.renderer().frames_rendered(),
        phase = ?engine.session().phase(),
        audio_requests = engine.audio().played().len(),
        pending_assets = engine.assets().in_flight_count(),
        "Starlit finished"
    );
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
