//! Pipeline components: course discovery, video collection, skipped-path handling, pass runner.

pub mod collect;
pub mod discovery;
pub mod error_handler;
pub mod worker;

pub use collect::{CollectScope, collect_videos};
pub use discovery::{CourseMarker, discover_courses, resolve_language_dirs};
pub use error_handler::{SkippedPaths, report_skipped_paths};
pub use worker::{PassEvent, PassHandle, PassRunner, ProgressSender};
