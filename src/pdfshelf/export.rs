use crate::data_url;
use crate::error::{Result, ShelfError};
use crate::model::PdfRecord;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a record's embedded content into `dir` under its original filename.
///
/// An existing file is never overwritten; a ` (n)` suffix is added instead.
pub fn download(record: &PdfRecord, dir: &Path) -> Result<PathBuf> {
    let content = data_url::decode(&record.data_url)?;
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(ShelfError::Io)?;
    }

    let path = unique_path(dir, &sanitize_filename(&record.filename));
    fs::write(&path, &content.bytes).map_err(ShelfError::Io)?;
    info!("Downloaded {} to {}", record.id, path.display());
    Ok(path)
}

/// Bundle several records into `dir/pdfshelf-<timestamp>.tar.gz`.
pub fn export_bundle(records: &[&PdfRecord], dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(ShelfError::Io)?;
    }
    let filename = format!("pdfshelf-{}.tar.gz", Utc::now().format("%Y-%m-%d_%H-%M-%S"));
    let path = unique_path(dir, &filename);
    let file = File::create(&path).map_err(ShelfError::Io)?;
    write_archive(file, records)?;
    info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}

pub fn write_archive<W: Write>(writer: W, records: &[&PdfRecord]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);
    let mut used = HashSet::new();

    for record in records {
        let content = data_url::decode(&record.data_url)?;
        let mut name = sanitize_filename(&record.filename);
        if !used.insert(name.clone()) {
            let short_id = record.id.rsplit('-').next().unwrap_or(&record.id);
            name = suffixed(&name, &format!("-{short_id}"));
            used.insert(name.clone());
        }

        let mut header = tar::Header::new_gnu();
        header.set_size(content.bytes.len() as u64);
        header.set_mode(0o644);
        header.set_mtime((record.uploaded_at.max(0) / 1000) as u64);
        header.set_cksum();

        tar.append_data(&mut header, format!("pdfshelf/{name}"), content.bytes.as_slice())
            .map_err(ShelfError::Io)?;
    }

    tar.into_inner()
        .and_then(|enc| enc.finish())
        .map_err(ShelfError::Io)?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    let cleaned = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '(' | ')') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .trim_start_matches('.')
        .to_string();
    if cleaned.is_empty() {
        "document.pdf".to_string()
    } else {
        cleaned
    }
}

/// `name` with `tag` inserted before the extension.
fn suffixed(name: &str, tag: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}{tag}.{ext}"),
        _ => format!("{name}{tag}"),
    }
}

fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| dir.join(suffixed(name, &format!(" ({n})"))))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
