mod cli;
mod export;
mod renderer;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use dslv_viz_core::{Scene, Session, ViewConfig};
use log::{debug, info};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    debug!("command-line args: {args:?}");

    let mut config = match &args.config {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ViewConfig::from_json(&data)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ViewConfig::default(),
    };
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }

    let data = std::fs::read(&args.trace)
        .with_context(|| format!("reading trace {}", args.trace.display()))?;
    let frames = dslv_viz_core::parse_trace(&data)
        .with_context(|| format!("loading trace {}", args.trace.display()))?;
    info!("{}: {} frames", args.trace.display(), frames.len());

    if let Some(dir) = &args.export {
        let session = Session::init(Scene::new(), frames, config, 0)?;
        return export::export_frames(session, dir, args.format, args.dark);
    }

    let session = Session::init(Scene::new(), frames, config, args.start_frame)?;
    let session = renderer::run_tui(session)?;
    session.shutdown();
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.format_timestamp_millis();

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
