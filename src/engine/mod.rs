//! Engine module: naming, ordering, classification, chapters and NFO content

pub mod arg_parser;
pub mod chapters;
pub mod classify;
pub mod handlers;
pub mod nfo;
pub mod numbering;
pub mod ordering;
pub mod progress;
pub mod tags;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::{Cli, Commands, CommonArgs, GenerateArgs};
pub use chapters::{build_chapters, count_videos};
pub use classify::{classify, classify_collected};
pub use handlers::{handle_generate, handle_nomedia, handle_scan};
pub use nfo::{TvShowNfo, read_tvshow_nfo};
pub use numbering::{extract_number, extract_number_tuple};
pub use ordering::{OrderingMode, order_videos};
pub use tags::collect_tags;
pub use tools::{file_name_string, path_relative_to};
