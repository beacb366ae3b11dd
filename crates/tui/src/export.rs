use std::path::Path;

use anyhow::{Context, Result};
use dslv_viz_core::svg::render_svg;
use dslv_viz_core::{NavEvent, Scene, Session};
use log::info;

use crate::cli::ExportFormat;

/// Write one file per frame, stepping the session from its current frame to
/// the end so the output reflects the same reconcile path as the viewer.
pub fn export_frames(
    mut session: Session<Scene>,
    dir: &Path,
    format: ExportFormat,
    dark: bool,
) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = 0usize;
    loop {
        let path = dir.join(format!(
            "frame_{:04}.{}",
            session.current_index(),
            format.extension()
        ));
        let commands = session.surface().commands();
        let contents = match format {
            ExportFormat::Svg => render_svg(&commands, dark),
            ExportFormat::Json => serde_json::to_string_pretty(&commands)?,
        };
        std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        written += 1;

        if !session.handle(NavEvent::Next)?.changed() {
            break;
        }
    }

    info!("exported {written} frames to {}", dir.display());
    session.shutdown();
    Ok(())
}
