//! Clipline CLI: inspect and edit timeline files from the command line.
//!
//! Usage:
//!   clipline init <NAME>            Create an empty timeline file
//!   clipline validate <PATH>        Validate a timeline file
//!   clipline info <PATH>            Show timeline information
//!   clipline segments <PATH>        List a track's playback segments
//!   clipline map <PATH> <SECS>...   Map timeline times to source times
//!   clipline snap <PATH> <SECS>     Snap a time to the nearest snap point
//!   clipline place <PATH>           Place or move a clip on a track
//!   clipline play <PATH>            Simulate playback over a track

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clipline_common::config::{config_file_path, EditorConfig};
use clipline_common::error::CliplineError;

mod commands;

#[derive(Parser)]
#[command(
    name = "clipline",
    about = "Timeline editing core: snapping, overlap resolution, and time mapping",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty timeline with one track per clip kind
    Init {
        /// Timeline name
        name: String,

        /// Output file
        #[arg(short, long, default_value = "timeline.json")]
        output: PathBuf,
    },

    /// Validate a timeline file
    Validate {
        /// Path to the timeline JSON file
        path: PathBuf,
    },

    /// Show timeline information
    Info {
        /// Path to the timeline JSON file
        path: PathBuf,
    },

    /// List the playback segments of a track
    Segments {
        /// Path to the timeline JSON file
        path: PathBuf,

        /// Track id
        #[arg(short, long, default_value = "video")]
        track: String,

        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Map timeline times onto source times
    Map {
        /// Path to the timeline JSON file
        path: PathBuf,

        /// Timeline times in seconds
        #[arg(required = true, allow_negative_numbers = true)]
        times: Vec<f64>,

        /// Track id
        #[arg(short, long, default_value = "video")]
        track: String,
    },

    /// Snap a timeline time to the nearest clip edge, playhead, or marker
    Snap {
        /// Path to the timeline JSON file
        path: PathBuf,

        /// Timeline time in seconds
        #[arg(allow_negative_numbers = true)]
        time: f64,

        /// Track id
        #[arg(short, long, default_value = "video")]
        track: String,

        /// Clip whose edges are ignored (the clip being dragged)
        #[arg(long)]
        exclude: Option<String>,

        /// Snap tolerance in seconds (defaults to the configured threshold)
        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// Place a new clip or move an existing one, resolving overlaps
    Place {
        /// Path to the timeline JSON file
        path: PathBuf,

        /// Track id
        #[arg(short, long, default_value = "video")]
        track: String,

        /// Clip id
        #[arg(long)]
        clip: String,

        /// Requested start time in seconds
        #[arg(long)]
        at: f64,

        /// Source media reference, required for a new clip
        #[arg(long, requires = "source_out")]
        source: Option<String>,

        /// Source in-point in seconds
        #[arg(long, default_value = "0.0")]
        source_in: f64,

        /// Source out-point in seconds, required for a new clip
        #[arg(long, requires = "source")]
        source_out: Option<f64>,

        /// Write the result back to the timeline file
        #[arg(long)]
        write: bool,
    },

    /// Drive the playback clock over a track and report source switches
    Play {
        /// Path to the timeline JSON file
        path: PathBuf,

        /// Track id
        #[arg(short, long, default_value = "video")]
        track: String,

        /// Ticks per second
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Playback rate
        #[arg(long, default_value = "1.0")]
        rate: f64,

        /// Start position in seconds
        #[arg(long, default_value = "0.0")]
        from: f64,
    },
}

/// Read the config file without logging, so logging can be set up from it.
/// A file that fails to load yields the defaults plus the error to report.
fn read_config(path: &Path) -> (EditorConfig, Option<CliplineError>) {
    match EditorConfig::read_from(path) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (EditorConfig::default(), Some(e)),
    }
}

/// `(source_ref, source_in, source_out)` for a new clip, `None` for a move.
fn new_clip_args(
    source: Option<String>,
    source_in: f64,
    source_out: Option<f64>,
) -> anyhow::Result<Option<(String, f64, f64)>> {
    match (source, source_out) {
        (Some(source), Some(out)) => Ok(Some((source, source_in, out))),
        (None, None) => Ok(None),
        _ => anyhow::bail!("A new clip needs both --source and --source-out"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = config_file_path();
    let (config, config_error) = read_config(&config_path);

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    clipline_common::logging::init_logging(&logging);

    if let Some(e) = config_error {
        tracing::warn!(path = ?config_path, error = %e, "Failed to load config, using defaults");
    }
    config.validate()?;

    match cli.command {
        Commands::Init { name, output } => commands::init::run(name, output),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Info { path } => commands::info::run(path),
        Commands::Segments { path, track, json } => commands::segments::run(path, track, json),
        Commands::Map { path, times, track } => commands::map::run(path, track, times, &config),
        Commands::Snap {
            path,
            time,
            track,
            exclude,
            tolerance,
        } => commands::snap::run(path, track, time, exclude, tolerance, &config),
        Commands::Place {
            path,
            track,
            clip,
            at,
            source,
            source_in,
            source_out,
            write,
        } => commands::place::run(
            path,
            track,
            clip,
            at,
            new_clip_args(source, source_in, source_out)?,
            write,
        ),
        Commands::Play {
            path,
            track,
            fps,
            rate,
            from,
        } => commands::play::run(path, track, fps, rate, from, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_args(extra: &[&str]) -> Vec<String> {
        let mut args = vec!["clipline", "place", "timeline.json", "--clip", "c", "--at", "1.0"];
        args.extend_from_slice(extra);
        args.into_iter().map(String::from).collect()
    }

    #[test]
    fn test_place_rejects_half_specified_new_clip() {
        let err = Cli::try_parse_from(place_args(&["--source", "intro.mp4"]))
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(place_args(&["--source-out", "3.0"]))
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_place_accepts_move_and_full_new_clip() {
        let cli = Cli::try_parse_from(place_args(&[])).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Place {
                source: None,
                source_out: None,
                ..
            }
        ));

        let cli = Cli::try_parse_from(place_args(&[
            "--source",
            "intro.mp4",
            "--source-in",
            "0.5",
            "--source-out",
            "3.0",
        ]))
        .unwrap();
        match cli.command {
            Commands::Place {
                source,
                source_in,
                source_out,
                ..
            } => {
                assert_eq!(source.as_deref(), Some("intro.mp4"));
                assert_eq!(source_in, 0.5);
                assert_eq!(source_out, Some(3.0));
            }
            _ => panic!("expected the place command"),
        }
    }

    #[test]
    fn test_new_clip_args_need_source_and_out_point() {
        assert_eq!(
            new_clip_args(Some("intro.mp4".into()), 0.5, Some(3.0)).unwrap(),
            Some(("intro.mp4".to_string(), 0.5, 3.0))
        );
        assert_eq!(new_clip_args(None, 0.0, None).unwrap(), None);
        assert!(new_clip_args(Some("intro.mp4".into()), 0.0, None).is_err());
        assert!(new_clip_args(None, 0.0, Some(3.0)).is_err());
    }

    #[test]
    fn test_read_config_keeps_the_error_for_later_reporting() {
        let dir = std::env::temp_dir().join("clipline_cli_test_bad_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let (config, error) = read_config(&path);
        assert!(matches!(error, Some(CliplineError::Json(_))));
        assert_eq!(config.logging.level, "info");

        let (_, error) = read_config(&dir.join("missing.json"));
        assert!(error.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
