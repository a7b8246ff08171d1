use crate::core::finder::{AiStatus, SearchReport};
use crate::domain::catalog::BedtimeStory;
use crate::domain::model::Activity;
use crate::utils::error::{PlayError, Result};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

const NO_GAMES_HINT: &str = "We couldn't find any games that match your criteria. Try adjusting the age range or available time.";

pub fn render_report(report: &SearchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => activities_csv(&report.activities),
    }
}

pub fn render_stories(stories: &[BedtimeStory], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::from("📚 Bedtime Stories\n");
            for story in stories {
                let _ = writeln!(
                    out,
                    "\n{}. {} ({})\n   ▶ {}",
                    story.id,
                    story.title,
                    story.duration,
                    story.video.watch_url()
                );
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stories)?),
        OutputFormat::Csv => {
            #[derive(Serialize)]
            struct StoryRow<'a> {
                id: &'a str,
                title: &'a str,
                duration: &'a str,
                video_url: String,
                thumbnail_url: String,
            }

            write_csv(stories.iter().map(|story| StoryRow {
                id: &story.id,
                title: &story.title,
                duration: &story.duration,
                video_url: story.video.watch_url(),
                thumbnail_url: story.video.thumbnail_url(),
            }))
        }
    }
}

fn report_text(report: &SearchReport) -> String {
    let mut out = String::new();

    if report.query.featured_id.is_some() {
        out.push_str("⭐ Game of the Day\n");
    } else {
        let _ = writeln!(
            out,
            "🎲 Game Suggestions for a {} year old • {} minutes available",
            report.query.age, report.query.available_minutes
        );
        if let Some(category) = &report.query.category {
            let _ = writeln!(out, "   category: {}", category);
        }
    }

    if report.ai == AiStatus::Ranked {
        out.push_str("🤖 Sorted by AI recommendation\n");
    }

    if report.activities.is_empty() {
        let _ = write!(out, "\nNo Games Found\n{}\n", NO_GAMES_HINT);
        return out;
    }

    for (index, activity) in report.activities.iter().enumerate() {
        out.push('\n');
        out.push_str(&activity_card(index + 1, activity));
    }
    out
}

fn activity_card(position: usize, activity: &Activity) -> String {
    let tags = activity.tags.iter().cloned().collect::<Vec<_>>().join(", ");
    format!(
        "{}. {} ({} min, ages {}-{})\n   {}\n   tags: {}\n   ▶ {}\n",
        position,
        activity.title,
        activity.time_required_minutes,
        activity.min_age,
        activity.max_age,
        activity.description,
        tags,
        activity.video.watch_url()
    )
}

#[derive(Serialize)]
struct ActivityRow<'a> {
    id: &'a str,
    title: &'a str,
    min_age: i64,
    max_age: i64,
    minutes: i64,
    tags: String,
    video_url: String,
}

fn activities_csv(activities: &[Activity]) -> Result<String> {
    write_csv(activities.iter().map(|activity| ActivityRow {
        id: &activity.id,
        title: &activity.title,
        min_age: activity.min_age,
        max_age: activity.max_age,
        minutes: activity.time_required_minutes,
        tags: activity.tags.iter().cloned().collect::<Vec<_>>().join(";"),
        video_url: activity.video.watch_url(),
    }))
}

fn write_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PlayError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| PlayError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
