use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::Layout;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Infer chapter structure and episode order of video courses and write Kodi-style NFO files.
#[derive(Clone, Parser)]
#[command(name = "coursenfo")]
#[command(about = "Scan a course library and write tvshow/episode NFO files.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// List discovered courses, their structure and episode counts. Writes nothing.
    Scan(CommonArgs),
    /// Scan, then write tvshow.nfo and one NFO per video.
    Generate(GenerateArgs),
    /// Create .nomedia in every original-language directory.
    Nomedia(CommonArgs),
}

/// Flags shared by every subcommand. Unset flags fall back to `.coursenfo.toml`, then defaults.
#[derive(Clone, Args)]
pub struct CommonArgs {
    /// Library root. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Course layout: which marker file makes a course and how variants are ordered.
    #[arg(long, value_enum)]
    pub layout: Option<Layout>,

    /// Directory depth collected by the nested layout.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub depth: Option<usize>,

    /// Extra mandarin variant directory names, comma separated.
    #[arg(long, value_name = "NAMES")]
    pub mandarin_dirs: Option<String>,

    /// Extra original-language directory names, comma separated.
    #[arg(long, value_name = "NAMES")]
    pub original_dirs: Option<String>,

    /// Video extensions, comma separated (replaces the default list).
    #[arg(long, value_name = "EXTS")]
    pub extensions: Option<String>,

    /// Collect videos even below directories holding `.nomedia`.
    #[arg(long)]
    pub no_stop_marker: bool,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

#[derive(Clone, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Rewrite NFO files that already exist.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub overwrite: Option<bool>,

    /// Course type written as <coursetype> into every tvshow.nfo. Repeatable.
    #[arg(long = "course-type", value_name = "TYPE")]
    pub course_types: Vec<String>,
}
