use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Local};

pub fn raw_jsonl_path(out_dir: &Path, video_id: &str, fetched_at: DateTime<Local>) -> PathBuf {
    let stamp = fetched_at.format("%Y-%m-%dT%H-%M-%S-%3f");
    out_dir.join(format!("{}_{stamp}.jsonl", file_safe(video_id)))
}

pub fn parsed_csv_path(out_dir: &Path, raw_path: &Path) -> anyhow::Result<PathBuf> {
    let stem = raw_path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("raw path must have a file name: {}", raw_path.display()))?;
    Ok(out_dir.join(format!("{stem}.csv")))
}

/// Creates the raw output file. Fails instead of overwriting a previous run.
pub fn create_raw_file(path: &Path) -> anyhow::Result<File> {
    let parent_dir = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("raw path must have parent: {}", path.display()))?;
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("create raw output dir: {}", parent_dir.display()))?;

    OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .with_context(|| format!("create raw output: {}", path.display()))
}

// Video ids are [A-Za-z0-9_-]; anything else would escape the output dir.
fn file_safe(video_id: &str) -> String {
    video_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
