use chrono::{DateTime, Utc};
use colored::Colorize;
use pdfshelf::api::{CmdMessage, ListedRecord, MessageLevel, ViewerStatus};
use pdfshelf::config::ShelfConfig;
use pdfshelf::model::{Annotation, Millis};
use pdfshelf::settings::Settings;
use std::path::PathBuf;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const META_WIDTH: usize = 34;
const FAVORITE_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[ListedRecord]) {
    if records.is_empty() {
        println!("No documents found.");
        return;
    }

    for listed in records {
        let record = &listed.record;
        let marker = if record.favorite {
            format!("  {} ", FAVORITE_MARKER)
        } else {
            "    ".to_string()
        };
        let idx = format!("{}. ", listed.position);
        let meta = format!(
            "{:>10} {:>11} {:>4} views ",
            record.category,
            format_bytes(record.size),
            record.views
        );
        let time = format_time_ago(record.last_viewed_at.unwrap_or(record.uploaded_at));

        let fixed = marker.width() + idx.width() + META_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&record.name, available);
        let padding = available.saturating_sub(name.width());

        let marker = if record.favorite {
            marker.yellow()
        } else {
            marker.normal()
        };
        println!(
            "{}{}{}{}{}{}",
            marker,
            idx.yellow(),
            name,
            " ".repeat(padding),
            meta.dimmed(),
            time.dimmed()
        );
    }
}

pub(super) fn print_categories(categories: &[String]) {
    for category in categories {
        println!("  {}", category);
    }
}

pub(super) fn print_status(status: &ViewerStatus) {
    match &status.record {
        Some(record) => {
            println!("{} {}", "Viewing".green(), record.name.bold());
            println!("  file        {}", record.filename);
            println!("  size        {}", format_bytes(record.size));
            println!("  views       {}", record.views);
            println!("  highlights  {}", record.annotations.len());
            println!("  tool        {}", status.tool);
            println!("  zoom        {}%", status.zoom_percent);
        }
        None => println!("{}", "No document is open.".dimmed()),
    }
    println!("  link        {}", status.location);
}

pub(super) fn print_annotations(annotations: &[Annotation]) {
    if annotations.is_empty() {
        println!("No highlights.");
        return;
    }
    for (i, a) in annotations.iter().enumerate() {
        println!(
            "{:>4}. {}  x {:>5.1}%  y {:>5.1}%  w {:>5.1}%  h {:>5.1}%  {}",
            i + 1,
            short_id(&a.id).yellow(),
            a.x * 100.0,
            a.y * 100.0,
            a.w * 100.0,
            a.h * 100.0,
            a.color.dimmed()
        );
    }
}

pub(super) fn print_settings(settings: &Settings) {
    println!("theme = {}", settings.theme);
    println!("primary = {}", settings.primary);
}

pub(super) fn print_config(config: &ShelfConfig) {
    for key in ShelfConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

pub(super) fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Human-readable size with two decimals, in B, KB, MB or GB.
pub(super) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(millis: Millis) -> String {
    let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(millis) else {
        return " ".repeat(TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer name", 6), "a lon…");
        assert_eq!(truncate_to_width("日本語の資料", 7), "日本語…");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
