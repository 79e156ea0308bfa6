//! Command handlers for scan, generate and nomedia operations

use anyhow::{Result, anyhow};
use kdam::Animation;
use log::{debug, info};

use crate::engine::arg_parser::{CommonArgs, GenerateArgs};
use crate::engine::progress::{ProgressBarConfig, create_progress_bar, finish_bar, set_bar_position};
use crate::generate::{generate_nfos, planned_files};
use crate::nomedia::create_nomedia_files;
use crate::pipeline::{PassEvent, PassRunner, report_skipped_paths};
use crate::scan::{ScanResult, scan_dir};
use crate::utils::coursenfo_toml::{apply_file_to_opts, load_coursenfo_toml};
use crate::utils::{Colors, setup_logging};
use crate::{Course, Opts, StructureClass};

/// Apply CLI flags on top of opts (only flags the user actually gave).
fn apply_cli_to_opts(common: &CommonArgs, opts: &mut Opts) {
    if let Some(layout) = common.layout {
        opts.layout = layout;
    }
    if let Some(depth) = common.depth {
        opts.depth = depth;
    }
    if let Some(ref names) = common.mandarin_dirs {
        opts.add_mandarin_dir_names(names);
    }
    if let Some(ref names) = common.original_dirs {
        opts.add_original_dir_names(names);
    }
    if let Some(ref exts) = common.extensions {
        opts.set_video_extensions(exts);
    }
    if common.no_stop_marker {
        opts.check_stop_marker = false;
    }
    if let Some(follow) = common.follow_links {
        opts.follow_links = follow;
    }
    if let Some(verbose) = common.verbose {
        opts.verbose = verbose;
    }
}

/// Defaults, then `.coursenfo.toml` in DIR, then CLI flags. Sets up logging with the result.
fn setup_opts(common: &CommonArgs) -> Result<Opts> {
    let mut opts = Opts::default();
    let file = load_coursenfo_toml(&common.dir)?;
    if let Some(ref file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    apply_cli_to_opts(common, &mut opts);
    setup_logging(opts.verbose);
    if file.is_some() {
        debug!("Loaded settings from {}", common.dir.display());
    }
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);
    Ok(opts)
}

fn print_course(course: &Course) {
    let structure = match course.structure {
        StructureClass::Unknown => Colors::colorize(Colors::SKIPPED, "unknown"),
        s => Colors::colorize(Colors::VIDEO, &s.to_string()),
    };
    println!(
        "{} [{}] {} | {} chapters, {} episodes",
        Colors::colorize(Colors::COURSE, &course.name),
        course.variant.label(),
        structure,
        course.chapters.len(),
        course.video_count
    );
}

fn print_scan_summary(result: &ScanResult) {
    for course in &result.courses {
        print_course(course);
    }
    let s = &result.stats;
    println!(
        "\n{} courses ({} mandarin, {} original, {} both, {} mandarin only, {} original only), {} videos",
        s.total_courses,
        s.with_mandarin,
        s.with_original,
        s.both_languages,
        s.mandarin_only,
        s.original_only,
        s.total_videos
    );
}

/// Handle scan command
pub fn handle_scan(common: &CommonArgs) -> Result<()> {
    let opts = setup_opts(common)?;
    let result = scan_dir(&common.dir, &opts)?;
    print_scan_summary(&result);
    report_skipped_paths(&result.skipped, opts.verbose);
    Ok(())
}

/// Handle generate command: scan and write NFOs on the pass runner, drawing progress from its events.
pub fn handle_generate(args: &GenerateArgs) -> Result<()> {
    let mut opts = setup_opts(&args.common)?;
    if let Some(overwrite) = args.overwrite {
        opts.overwrite = overwrite;
    }
    opts.course_types.extend(args.course_types.iter().cloned());

    let result = scan_dir(&args.common.dir, &opts)?;
    report_skipped_paths(&result.skipped, opts.verbose);
    let total = planned_files(&result.courses);
    info!("Writing up to {} NFO files for {} course variants", total, result.courses.len());

    let runner = PassRunner::new();
    let pass_opts = opts.clone();
    let courses = result.courses;
    let handle = runner
        .try_start("generate", move |progress| {
            generate_nfos(&courses, &pass_opts, |done, total| progress.progress(done, total))
        })
        .ok_or_else(|| anyhow!("another pass is already running"))?;

    let bar = opts
        .verbose
        .then(|| create_progress_bar(ProgressBarConfig::new(total, "Writing NFOs", Animation::Classic)));
    for event in handle.events.iter() {
        match (event, bar.as_ref()) {
            (PassEvent::Progress { done, total }, Some(bar)) => set_bar_position(bar, done, total),
            (PassEvent::Finished, Some(bar)) => finish_bar(bar),
            _ => {}
        }
    }
    let report = handle.join()?;
    println!(
        "{} NFO files: {} written, {} kept, {} failed",
        report.total(),
        Colors::colorize(Colors::COURSE, &report.written.to_string()),
        report.kept,
        report.failed
    );
    report_skipped_paths(&report.skipped, opts.verbose);
    Ok(())
}

/// Handle nomedia command
pub fn handle_nomedia(common: &CommonArgs) -> Result<()> {
    let opts = setup_opts(common)?;
    let report = create_nomedia_files(&common.dir, &opts)?;
    for dir in &report.created {
        debug!("Created .nomedia in {}", dir.display());
    }
    println!("{} .nomedia files created", report.created.len());
    report_skipped_paths(&report.skipped, opts.verbose);
    Ok(())
}
