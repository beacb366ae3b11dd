use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Step through a recorded drag-sort list trace frame by frame
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Trace file written by the list's state tracker
    #[arg(value_name = "TRACE", default_value = "dslv_state.txt")]
    pub trace: PathBuf,

    /// Starting frame (0-based); negative opens the last frame
    #[arg(long = "frame", value_name = "N", default_value_t = -1, allow_hyphen_values = true)]
    pub start_frame: i64,

    /// Frames skipped by PageUp/PageDown
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// JSON view configuration (width, x_buffer, y_buffer, page_size)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write every frame to DIR instead of opening the viewer
    #[arg(long = "export", value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Export format
    #[arg(long = "format", value_enum, default_value_t = ExportFormat::Svg)]
    pub format: ExportFormat,

    /// Use the dark palette for SVG export
    #[arg(long = "dark")]
    pub dark: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Write log output to FILE instead of stderr
    #[arg(long = "log", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Svg,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_the_last_frame() {
        let args = Args::try_parse_from(["dslv-viz"]).unwrap();
        assert_eq!(args.trace, PathBuf::from("dslv_state.txt"));
        assert_eq!(args.start_frame, -1);
        assert_eq!(args.format, ExportFormat::Svg);
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn parses_export_options() {
        let args = Args::try_parse_from([
            "dslv-viz", "trace.xml", "--frame", "3", "--page-size", "10", "--export", "out",
            "--format", "json", "-vv",
        ])
        .unwrap();
        assert_eq!(args.start_frame, 3);
        assert_eq!(args.page_size, Some(10));
        assert_eq!(args.export, Some(PathBuf::from("out")));
        assert_eq!(args.format.extension(), "json");
        assert_eq!(args.verbosity, 2);
    }

    #[test]
    fn negative_frame_is_accepted() {
        let args = Args::try_parse_from(["dslv-viz", "--frame", "-5"]).unwrap();
        assert_eq!(args.start_frame, -5);
    }
}
