use coursenfo::engine::classify;
use coursenfo::pipeline::{CollectScope, SkippedPaths, collect_videos};
use coursenfo::{Layout, LanguageVariant, Opts, StructureClass, scan_dir};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create every relative path under `root`; names ending in `/` are directories, the rest empty files.
fn build_tree(root: &Path, entries: &[&str]) {
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
        } else {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"").unwrap();
        }
    }
}

fn tree(entries: &[&str]) -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    build_tree(tmp.path(), entries);
    tmp
}

fn episode_of(course: &coursenfo::Course, name: &str) -> usize {
    let mut found = None;
    for chapter in &course.chapters {
        chapter.for_each_video_group(&mut Vec::new(), &mut |_, videos| {
            if let Some(v) = videos.iter().find(|v| v.name == name) {
                found = Some(v.episode);
            }
        });
    }
    found.unwrap_or_else(|| panic!("no video {name}"))
}

#[test]
fn scenario_a_nested_one() {
    let tmp = tree(&[
        "1 - Intro/1 - Welcome.mp4",
        "1 - Intro/2 - Goals.mp4",
        "2 - Basics/1 - Types.mp4",
    ]);
    assert_eq!(classify(tmp.path(), &Opts::default()), StructureClass::NestedOne);
}

#[test]
fn scenario_c_mixed() {
    let tmp = tree(&["x.mp4", "1 - Ch1/y.mp4"]);
    assert_eq!(classify(tmp.path(), &Opts::default()), StructureClass::Mixed);
}

#[test]
fn classify_flat_nested_two_and_unknown() {
    let flat = tree(&["1.mp4", "notes.txt", "empty/"]);
    assert_eq!(classify(flat.path(), &Opts::default()), StructureClass::Flat);

    let two = tree(&["1 - A/1 - a/1.mp4", "1 - A/2 - b/1.mp4"]);
    assert_eq!(classify(two.path(), &Opts::default()), StructureClass::NestedTwo);

    let none = tree(&["docs/readme.txt", "empty/"]);
    assert_eq!(classify(none.path(), &Opts::default()), StructureClass::Unknown);
}

#[test]
fn any_nested_subdirectory_means_nested_two() {
    let tmp = tree(&["1 - A/1.mp4", "1 - A/resources/"]);
    assert_eq!(classify(tmp.path(), &Opts::default()), StructureClass::NestedTwo);

    // Language and stop-marked directories are not evidence.
    let skipped = tree(&["1 - A/1.mp4", "1 - A/原/1.mp4", "1 - A/hidden/.nomedia"]);
    assert_eq!(classify(skipped.path(), &Opts::default()), StructureClass::NestedOne);
}

#[test]
fn classify_ignores_other_extensions_and_os_artefacts() {
    let tmp = tree(&["._1.mp4", "1.srt", "1 - A/1.MKV"]);
    assert_eq!(classify(tmp.path(), &Opts::default()), StructureClass::NestedOne);
}

#[test]
fn scenario_d_stop_marker_hides_subtree() {
    let tmp = tree(&[
        "1 - A/1.mp4",
        "2 - Hidden/.nomedia",
        "2 - Hidden/1.mp4",
        "2 - Hidden/deeper/2.mp4",
    ]);
    let opts = Opts::default();
    let mut skipped = SkippedPaths::new();
    let videos = collect_videos(tmp.path(), &opts, CollectScope::unbounded(), &mut skipped);
    assert_eq!(videos.len(), 1);
    assert!(skipped.is_empty());

    let hidden = collect_videos(&tmp.path().join("2 - Hidden"), &opts, CollectScope::unbounded(), &mut skipped);
    assert!(hidden.is_empty());

    let opts = Opts {
        check_stop_marker: false,
        ..Opts::default()
    };
    let all = collect_videos(tmp.path(), &opts, CollectScope::unbounded(), &mut skipped);
    assert_eq!(all.len(), 3);
}

#[test]
fn collector_skips_reoccurring_language_dirs() {
    let tmp = tree(&["1.mp4", "原/1.mp4", "1 - A/普通话gemini/2.mp4", "1 - A/3.mp4"]);
    let mut skipped = SkippedPaths::new();
    let videos = collect_videos(tmp.path(), &Opts::default(), CollectScope::up_to(2), &mut skipped);
    let mut names: Vec<_> = videos.iter().map(|v| v.name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["1", "3"]);
}

#[cfg(unix)]
#[test]
fn collector_records_symlink_loop_and_keeps_walking() {
    let tmp = tree(&["1.mp4", "sub/2.mp4", "sub/3.mp4"]);
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("sub/loop")).unwrap();
    let opts = Opts {
        follow_links: true,
        ..Opts::default()
    };
    let mut skipped = SkippedPaths::new();
    let videos = collect_videos(tmp.path(), &opts, CollectScope::unbounded(), &mut skipped);
    let names: Vec<_> = videos.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["1", "2", "3"]);
    assert_eq!(skipped.len(), 1);
    let (path, _) = skipped.iter().next().unwrap();
    assert!(path.ends_with("sub/loop"));
}

#[cfg(unix)]
#[test]
fn discovery_records_symlink_loop_and_finds_siblings() {
    let tmp = tree(&["A/lession", "A/原/1.mp4", "M/", "Z/lession", "Z/原/1.mp4"]);
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("M/loop")).unwrap();
    let opts = Opts {
        follow_links: true,
        ..Opts::default()
    };
    let result = scan_dir(tmp.path(), &opts).unwrap();
    let names: Vec<_> = result.discovered.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "Z"]);
    assert_eq!(result.courses.len(), 2);
    assert!(result.skipped.iter().any(|(p, _)| p.ends_with("M/loop")));
}

#[test]
fn scenario_e_marker_is_case_insensitive() {
    let tmp = tree(&[
        "Upper/LESSION",
        "Upper/原/1.mp4",
        "Title/Lession",
        "Title/原/1.mp4",
        "Plain/lession",
        "Plain/原/1.mp4",
        "NotACourse/原/1.mp4",
    ]);
    let result = scan_dir(tmp.path(), &Opts::default()).unwrap();
    let mut names: Vec<_> = result.discovered.iter().map(|c| c.name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["Plain", "Title", "Upper"]);
}

#[test]
fn discovery_resolves_variants_and_stops_at_course_roots() {
    let tmp = tree(&[
        "Lib/Rust [Deep]/lession",
        "Lib/Rust [Deep]/普通话gemini/1 - Intro/1 - Hello.mp4",
        "Lib/Rust [Deep]/普通话DeepL/1 - Intro/1 - Hello.mp4",
        "Lib/Rust [Deep]/原/1 - Intro/1 - Hello.mp4",
        "Lib/Rust [Deep]/原/1 - Intro/2 - World.mp4",
        "Lib/Rust [Deep]/Nested/lession",
        "Lib/Go/lession",
        "Lib/Go/原/x.mp4",
        "Lib/Empty/lession",
    ]);
    let result = scan_dir(tmp.path(), &Opts::default()).unwrap();

    let names: Vec<_> = result.discovered.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Empty", "Go", "Rust [Deep]"]);

    let rust = &result.discovered[2];
    assert_eq!(rust.mandarin_paths.len(), 2);
    assert!(rust.mandarin_paths[0].ends_with("普通话DeepL"));
    assert!(rust.has_original());
    assert!(!result.discovered[0].has_mandarin() && !result.discovered[0].has_original());

    let variants: Vec<_> = result
        .courses
        .iter()
        .map(|c| (c.name.as_str(), c.variant.clone(), c.video_count))
        .collect();
    assert_eq!(
        variants,
        vec![
            ("Go", LanguageVariant::Original, 1),
            ("Rust [Deep]", LanguageVariant::Mandarin("普通话DeepL".into()), 1),
            ("Rust [Deep]", LanguageVariant::Mandarin("普通话gemini".into()), 1),
            ("Rust [Deep]", LanguageVariant::Original, 2),
        ]
    );

    let stats = &result.stats;
    assert_eq!(stats.total_courses, 3);
    assert_eq!(stats.both_languages, 1);
    assert_eq!(stats.original_only, 1);
    assert_eq!(stats.mandarin_only, 0);
    assert_eq!(stats.total_videos, 5);
}

#[test]
fn scan_numbers_scenario_a_and_c_through_variants() {
    let tmp = tree(&[
        "A/lession",
        "A/原/1 - Intro/1 - Welcome.mp4",
        "A/原/1 - Intro/2 - Goals.mp4",
        "A/原/2 - Basics/1 - Types.mp4",
        "C/lession",
        "C/原/x.mp4",
        "C/原/1 - Ch1/y.mp4",
    ]);
    let result = scan_dir(tmp.path(), &Opts::default()).unwrap();
    let a = &result.courses[0];
    assert_eq!(a.structure, StructureClass::NestedOne);
    assert_eq!(episode_of(a, "1 - Welcome"), 1);
    assert_eq!(episode_of(a, "2 - Goals"), 2);
    assert_eq!(episode_of(a, "1 - Types"), 3);

    let c = &result.courses[1];
    assert_eq!(c.structure, StructureClass::Mixed);
    assert_eq!(c.chapters[0].name, "");
    assert_eq!(episode_of(c, "x"), 1);
    assert_eq!(episode_of(c, "y"), 2);
}

#[test]
fn unknown_variant_builds_nothing() {
    let tmp = tree(&["A/lession", "A/原/docs/readme.txt"]);
    let result = scan_dir(tmp.path(), &Opts::default()).unwrap();
    assert_eq!(result.discovered.len(), 1);
    assert!(result.courses.is_empty());
}

#[test]
fn nested_layout_collects_every_level_up_to_depth() {
    let tmp = tree(&[
        "N/lession_2",
        "N/原/intro.mp4",
        "N/原/1 - A/own.mp4",
        "N/原/1 - A/1.1 - sub/1.mp4",
        "N/原/1 - A/1.1 - sub/too deep/9.mp4",
        "N/原/2 - B/1.2 x.mp4",
        "N/原/2 - B/1.10 y.mp4",
        "Classic/lession",
        "Classic/原/1.mp4",
    ]);
    let opts = Opts {
        layout: Layout::Nested,
        depth: 2,
        ..Opts::default()
    };
    let result = scan_dir(tmp.path(), &opts).unwrap();
    assert_eq!(result.discovered.len(), 1);
    let course = &result.courses[0];
    assert_eq!(course.video_count, 5);
    assert_eq!(episode_of(course, "intro"), 1);
    assert_eq!(episode_of(course, "own"), 2);
    assert_eq!(episode_of(course, "1"), 3);
    assert_eq!(episode_of(course, "1.2 x"), 4);
    assert_eq!(episode_of(course, "1.10 y"), 5);

    let a = course.chapters.iter().find(|c| c.name == "1 - A").unwrap();
    assert_eq!(a.videos.len(), 1);
    assert_eq!(a.sub_chapters[0].name, "1.1 - sub");
}

#[test]
fn single_layout_uses_course_root() {
    let tmp = tree(&["S/single.txt", "S/2.mp4", "S/1.mp4", "S/Extra/3.mp4"]);
    let opts = Opts {
        layout: Layout::Single,
        ..Opts::default()
    };
    let result = scan_dir(tmp.path(), &opts).unwrap();
    assert_eq!(result.courses.len(), 1);
    let course = &result.courses[0];
    assert_eq!(course.variant, LanguageVariant::Single);
    assert_eq!(course.structure, StructureClass::Mixed);
    assert_eq!(episode_of(course, "1"), 1);
    assert_eq!(episode_of(course, "3"), 3);
}

#[test]
fn bad_root_and_bad_options_fail_before_traversal() {
    let tmp = tree(&["file.txt"]);
    assert!(scan_dir(&tmp.path().join("missing"), &Opts::default()).is_err());
    assert!(scan_dir(&tmp.path().join("file.txt"), &Opts::default()).is_err());

    let opts = Opts {
        layout: Layout::Nested,
        depth: 0,
        ..Opts::default()
    };
    assert!(scan_dir(tmp.path(), &opts).is_err());
    let opts = Opts {
        video_extensions: Vec::new(),
        ..Opts::default()
    };
    assert!(scan_dir(tmp.path(), &opts).is_err());
}

#[test]
fn numbering_is_independent_of_creation_order() {
    let entries = [
        "C/lession",
        "C/原/2 - B/1.mp4",
        "C/原/1 - A/2.mp4",
        "C/原/1 - A/1.mp4",
        "C/原/10 - J/1.mp4",
    ];
    let forward = tree(&entries);
    let mut reversed = entries;
    reversed.reverse();
    let backward = tree(&reversed);

    let numbering = |root: &Path| {
        let result = scan_dir(root, &Opts::default()).unwrap();
        let course = &result.courses[0];
        let mut out = Vec::new();
        for chapter in &course.chapters {
            chapter.for_each_video_group(&mut Vec::new(), &mut |chain, videos| {
                for v in videos {
                    out.push((chain.join("/"), v.name.clone(), v.episode));
                }
            });
        }
        out
    };
    let a = numbering(forward.path());
    assert_eq!(a, numbering(backward.path()));
    let episodes: Vec<_> = a.iter().map(|(_, _, e)| *e).collect();
    assert_eq!(episodes, vec![1, 2, 3, 4]);
    assert_eq!(a[3].0, "10 - J");
}
