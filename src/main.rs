use clap::{Parser, ValueEnum};
use revas_engine::{render_scene, RenderSettings, SceneDocument};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON scene document
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Output PNG path
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Number of frames to paint before encoding the last one
    #[arg(long, env = "REVAS_FRAMES", default_value_t = 1)]
    frames: u32,

    /// Ignore per-node cache requests
    #[arg(long)]
    no_cache: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides --log-level.
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(cli.log_level).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }

    let scene_path = cli.scene;
    let output_path = cli.output.unwrap_or_else(|| scene_path.with_extension("png"));

    info!("Scene: {:?}", scene_path);
    info!("Output: {:?}", output_path);

    let doc = match SceneDocument::from_path(&scene_path) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    };

    let settings = RenderSettings {
        frames: cli.frames,
        cache: !cli.no_cache,
    };

    let png = match render_scene(&doc, &settings) {
        Ok(png) => png,
        Err(e) => {
            error!("Render failed: {}", e);
            std::process::exit(1);
        }
    };

    match fs::write(&output_path, png) {
        Ok(()) => info!("Render complete."),
        Err(e) => {
            error!("Error writing {:?}: {}", output_path, e);
            std::process::exit(1);
        }
    }
}
