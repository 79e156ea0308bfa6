//! Coursenfo: infer chapter structure and episode order of video courses, write NFO metadata

pub mod engine;
pub mod generate;
pub mod nomedia;
pub mod pipeline;
pub mod scan;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::nfo::{TvShowNfo, read_tvshow_nfo};
pub use generate::{GenerateReport, generate_nfos};
pub use nomedia::{NomediaReport, create_nomedia_files};
pub use pipeline::{PassEvent, PassRunner, SkippedPaths};
pub use scan::{ScanResult, scan_dir};

/// Result alias used by public coursenfo API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
