use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli::ParseArgs;
use crate::config::Config;
use crate::formats::{CSV_HEADER, CommentRow, CommentThread};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    pub threads: usize,
    pub rows: usize,
}

pub fn thread_rows(thread: &CommentThread) -> Vec<CommentRow> {
    thread.comments().map(CommentRow::from).collect()
}

/// Converts line-delimited comment threads into CSV rows.
///
/// The first malformed line aborts the whole conversion; the error names its
/// line number. Blank lines are skipped.
pub fn normalize<R, W>(input: R, output: W) -> anyhow::Result<ParseSummary>
where
    R: BufRead,
    W: Write,
{
    let mut writer = csv::Writer::from_writer(output);
    writer
        .write_record(CSV_HEADER)
        .context("write csv header")?;

    let mut summary = ParseSummary {
        threads: 0,
        rows: 0,
    };
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("read raw line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let thread: CommentThread = serde_json::from_str(&line)
            .with_context(|| format!("parse comment thread on line {line_no}"))?;
        let rows = thread_rows(&thread);
        tracing::debug!(line = line_no, rows = rows.len(), "parsed comment thread");

        for row in &rows {
            writer
                .write_record(row.as_record())
                .with_context(|| format!("write csv row for comment {}", row.id))?;
        }
        summary.threads += 1;
        summary.rows += rows.len();
    }

    writer.flush().context("flush csv output")?;
    Ok(summary)
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let config = Config::from_env().context("load config")?;
    let raw_path = PathBuf::from(&args.raw);
    tracing::info!(path = %raw_path.display(), "reading raw comment threads");

    let raw = File::open(&raw_path)
        .with_context(|| format!("open raw comments: {}", raw_path.display()))?;

    let out_dir = config.parsed_output_dir();
    let out_path = crate::raw_store::parsed_csv_path(&out_dir, &raw_path)?;
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create parsed output dir: {}", out_dir.display()))?;
    let out = File::create(&out_path)
        .with_context(|| format!("create csv output: {}", out_path.display()))?;

    let summary = normalize(BufReader::new(raw), out)
        .with_context(|| format!("normalize {}", raw_path.display()))?;

    tracing::info!(
        threads = summary.threads,
        rows = summary.rows,
        "finished parsing comments"
    );
    tracing::info!(path = %out_path.display(), "saved results");
    println!("{}", out_path.display());

    Ok(())
}
