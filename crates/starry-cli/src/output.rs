//! Output formatting for CLI

use starry_core::{Episode, Video};
use std::fmt::Write;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

#[derive(Tabled)]
struct EpisodeRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Episode> for EpisodeRow {
    fn from(episode: &Episode) -> Self {
        Self {
            number: episode.number,
            title: episode.title.clone(),
            description: shorten(&episode.description, 60),
        }
    }
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Render a video in the selected format
pub fn render_video(video: &Video, format: &str) -> String {
    match OutputFormat::from(format) {
        OutputFormat::Json => {
            serde_json::to_string_pretty(video).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut out = header(video);
            if video.is_show() {
                let rows: Vec<EpisodeRow> = video.episodes().iter().map(EpisodeRow::from).collect();
                let _ = write!(out, "\n{}", Table::new(rows));
            }
            out
        }
        OutputFormat::Text => {
            let mut out = header(video);
            for episode in video.episodes() {
                let _ = write!(out, "\n  E{:<3} {}", episode.number, episode.title);
            }
            out
        }
    }
}

fn header(video: &Video) -> String {
    let kind = match video {
        Video::Show { episodes, .. } => format!("Show ({} episodes)", episodes.len()),
        Video::Movie { .. } => "Movie".to_string(),
    };
    format!(
        "{}\n  Type: {}\n  Thumbnail: {}\n  {}\n",
        video.title(),
        kind,
        video.thumbnail(),
        video.description()
    )
}
