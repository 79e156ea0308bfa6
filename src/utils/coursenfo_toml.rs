//! Load `.coursenfo.toml` from the scanned directory (CLI only). Lib callers build [`Opts`] directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::utils::config::PackagePaths;
use crate::{Layout, Opts};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CoursenfoToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    video_extensions: Option<Vec<String>>,
    check_nomedia: Option<bool>,
    follow_links: Option<bool>,
    overwrite: Option<bool>,
    mandarin_dirs: Option<Vec<String>>,
    original_dirs: Option<Vec<String>>,
    layout: Option<Layout>,
    depth: Option<usize>,
    course_types: Option<Vec<String>>,
    verbose: Option<bool>,
}

/// Load `.coursenfo.toml` from `dir` if present. A file that exists but does not parse is an error.
pub(crate) fn load_coursenfo_toml(dir: &Path) -> Result<Option<CoursenfoToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let file = parse_coursenfo_toml(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

pub(crate) fn parse_coursenfo_toml(s: &str) -> std::result::Result<CoursenfoToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($idx:expr, $opts:expr, $idx_field:ident => $opts_field:ident) => {
        if let Some(v) = $idx.$idx_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
/// Variant directory names extend the defaults rather than replacing them.
pub(crate) fn apply_file_to_opts(file: &CoursenfoToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(ref exts) = s.video_extensions {
        opts.set_video_extensions(&exts.join(","));
    }
    apply_file_opt!(s, opts, check_nomedia => check_stop_marker);
    apply_file_opt!(s, opts, follow_links => follow_links);
    apply_file_opt!(s, opts, overwrite => overwrite);
    if let Some(ref names) = s.mandarin_dirs {
        opts.add_mandarin_dir_names(&names.join(","));
    }
    if let Some(ref names) = s.original_dirs {
        opts.add_original_dir_names(&names.join(","));
    }
    apply_file_opt!(s, opts, layout => layout);
    apply_file_opt!(s, opts, depth => depth);
    if let Some(ref types) = s.course_types {
        opts.course_types.extend(types.iter().cloned());
    }
    apply_file_opt!(s, opts, verbose => verbose);
}
