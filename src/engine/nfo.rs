//! NFO documents: build `tvshow.nfo` / episode NFO content from a course, render it as
//! indented UTF-8 XML and read it back.

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::{HIDDEN_TAGS, NfoLabels};
use crate::{Course, LanguageVariant, VideoFile};

/// Content of a `tvshow.nfo`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TvShowNfo {
    pub title: String,
    pub plot: String,
    pub course_types: BTreeSet<String>,
    pub genres: BTreeSet<String>,
}

/// Content of a per-video NFO.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpisodeNfo {
    pub title: String,
    pub plot: String,
    pub season: u32,
    pub episode: usize,
}

/// Result of writing one NFO file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// File already existed and overwrite was off.
    Kept,
}

impl LanguageVariant {
    /// Suffix for titles and the `语言：` plot line.
    pub fn label(&self) -> &str {
        match self {
            LanguageVariant::Mandarin(dir_name) if !dir_name.trim().is_empty() => dir_name.trim(),
            LanguageVariant::Mandarin(_) => NfoLabels::MANDARIN,
            LanguageVariant::Original => NfoLabels::ORIGINAL,
            LanguageVariant::Single => NfoLabels::SINGLE,
        }
    }

    /// Genre marking the main language; the other language's genre is removed.
    fn genre(&self) -> (&'static str, Option<&'static str>) {
        match self {
            LanguageVariant::Mandarin(_) => (NfoLabels::MANDARIN, Some(NfoLabels::ORIGINAL)),
            LanguageVariant::Original => (NfoLabels::ORIGINAL, Some(NfoLabels::MANDARIN)),
            LanguageVariant::Single => (NfoLabels::SINGLE, None),
        }
    }
}

/// Course name up to the first `[`, trimmed (`"Rust 101 [Mandarin]"` → `"Rust 101"`).
pub fn display_title(course_name: &str) -> &str {
    course_name.split('[').next().unwrap_or(course_name).trim()
}

/// `tvshow.nfo` content for one course variant.
pub fn tvshow_for(course: &Course, tags: &BTreeSet<String>, course_types: &BTreeSet<String>) -> TvShowNfo {
    let label = course.variant.label();
    let mut plot = format!(
        "{}{}\n{}{}",
        NfoLabels::PLOT_COURSE,
        course.name,
        NfoLabels::PLOT_TOTAL,
        course.video_count
    );
    match course.variant {
        LanguageVariant::Single => {
            plot.push('\n');
            plot.push_str(NfoLabels::SINGLE_KIND);
        }
        _ => {
            plot.push('\n');
            plot.push_str(NfoLabels::PLOT_LANGUAGE);
            plot.push_str(label);
        }
    }

    let (genre, excluded) = course.variant.genre();
    let mut genres: BTreeSet<String> = tags
        .iter()
        .filter(|t| !HIDDEN_TAGS.contains(&t.as_str()))
        .filter(|t| Some(t.as_str()) != excluded)
        .cloned()
        .collect();
    genres.insert(genre.to_string());

    TvShowNfo {
        title: format!("{} {}", display_title(&course.name), label),
        plot,
        course_types: course_types.clone(),
        genres,
    }
}

/// Episode NFO content for `video`, with `chapter_path` the chapter names from the top level down.
pub fn episode_for(video: &VideoFile, chapter_path: &[&str], variant: &LanguageVariant) -> EpisodeNfo {
    let chapter = chapter_path
        .iter()
        .filter(|n| !n.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(NfoLabels::CHAPTER_SEPARATOR);
    let trailer = match variant {
        LanguageVariant::Single => NfoLabels::SINGLE_KIND.to_string(),
        _ => format!("{}{}", NfoLabels::PLOT_LANGUAGE, variant.label()),
    };
    let plot = if chapter.is_empty() {
        trailer
    } else {
        format!("{}{}\n{}", NfoLabels::PLOT_CHAPTER, chapter, trailer)
    };
    EpisodeNfo {
        title: video.name.clone(),
        plot,
        season: NfoLabels::DEFAULT_SEASON,
        episode: video.episode,
    }
}

/// NFO path beside a video: same stem, `.nfo` extension.
pub fn episode_nfo_path(video: &Path) -> PathBuf {
    video.with_extension(NfoLabels::NFO_EXTENSION)
}

fn render(root: &str, fields: &[(&str, &str)]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(root)))?;
    for (tag, text) in fields {
        writer.write_event(Event::Start(BytesStart::new(*tag)))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new(*tag)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    let mut xml = String::from_utf8(writer.into_inner()).context("NFO is not UTF-8")?;
    xml.push('\n');
    Ok(xml)
}

pub fn render_tvshow(nfo: &TvShowNfo) -> Result<String> {
    let mut fields: Vec<(&str, &str)> = vec![("title", nfo.title.as_str()), ("plot", nfo.plot.as_str())];
    fields.extend(nfo.course_types.iter().map(|t| ("coursetype", t.as_str())));
    fields.extend(nfo.genres.iter().map(|g| ("genre", g.as_str())));
    render("tvshow", &fields)
}

pub fn render_episode(nfo: &EpisodeNfo) -> Result<String> {
    let season = nfo.season.to_string();
    let episode = nfo.episode.to_string();
    render(
        "episodedetails",
        &[
            ("title", nfo.title.as_str()),
            ("plot", nfo.plot.as_str()),
            ("season", season.as_str()),
            ("episode", episode.as_str()),
        ],
    )
}

/// Write `content` to `path` unless a file is already there and `overwrite` is off.
/// Anything else at `path` (a directory, say) makes the write fail.
/// A failed write may leave a partial file; nothing is rolled back.
pub fn write_nfo(path: &Path, content: &str, overwrite: bool) -> Result<WriteOutcome> {
    if path.is_file() && !overwrite {
        return Ok(WriteOutcome::Kept);
    }
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(WriteOutcome::Written)
}

#[derive(Debug, Deserialize)]
struct TvShowDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    plot: String,
    #[serde(default, rename = "coursetype")]
    course_types: Vec<String>,
    #[serde(default, rename = "genre")]
    genres: Vec<String>,
}

/// Parse a `tvshow.nfo` document.
pub fn parse_tvshow(xml: &str) -> Result<TvShowNfo> {
    let doc: TvShowDoc = quick_xml::de::from_str(xml).context("parse tvshow.nfo")?;
    Ok(TvShowNfo {
        title: doc.title,
        plot: doc.plot,
        course_types: doc.course_types.into_iter().collect(),
        genres: doc.genres.into_iter().collect(),
    })
}

pub fn read_tvshow_nfo(path: &Path) -> Result<TvShowNfo> {
    let xml = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_tvshow(&xml)
}
