use std::io::{BufWriter, Write};

use anyhow::Context as _;

use crate::cli::FetchArgs;
use crate::config::Config;
use crate::youtube::{CommentPageSource, CommentThreadsClient, MAX_RESULTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStop {
    /// The API returned a page without items.
    EmptyPage,
    /// The page carried no continuation token.
    LastPage,
    /// `max_fetch_batches` pages were processed and more were still available.
    BatchCeiling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub stop: FetchStop,
    pub batches: u32,
    pub threads: usize,
}

/// Pages through all comment threads, writing each one as a compact JSON line.
///
/// Lines are flushed after every page, so a failure part way through leaves
/// everything fetched so far on disk.
pub fn fetch_all_comments<S, W>(
    source: &mut S,
    sink: &mut W,
    max_fetch_batches: u32,
) -> anyhow::Result<FetchSummary>
where
    S: CommentPageSource + ?Sized,
    W: Write + ?Sized,
{
    let mut page_token: Option<String> = None;
    let mut batch: u32 = 1;
    let mut threads = 0usize;

    let stop = loop {
        tracing::info!(batch, "loading batch");
        let page = source
            .fetch_page(page_token.as_deref())
            .with_context(|| format!("fetch batch {batch}"))?;

        let items = page.items.unwrap_or_default();
        if items.is_empty() {
            tracing::info!(batch, "batch has zero comment threads");
            break FetchStop::EmptyPage;
        }

        for item in &items {
            serde_json::to_writer(&mut *sink, item).context("write comment thread json")?;
            sink.write_all(b"\n")
                .context("write comment thread newline")?;
        }
        sink.flush().context("flush raw output")?;
        threads += items.len();
        tracing::debug!(batch, threads = items.len(), "wrote batch");

        let Some(next) = page.next_page_token else {
            tracing::info!(batch, "batch was the last one");
            break FetchStop::LastPage;
        };
        if batch >= max_fetch_batches {
            tracing::warn!(
                batch,
                max_fetch_batches,
                "hit the batch ceiling; stopping to avoid overusing API quota"
            );
            break FetchStop::BatchCeiling;
        }

        page_token = Some(next);
        batch += 1;
    };

    Ok(FetchSummary {
        stop,
        batches: batch,
        threads,
    })
}

pub fn run(args: FetchArgs) -> anyhow::Result<()> {
    let config = Config::from_env().context("load config")?;
    let api_key = crate::config::load_api_key(&config.api_key_file)?;

    tracing::info!(
        video_url = %format!("https://www.youtube.com/watch?v={}", args.video_id),
        page_size = MAX_RESULTS,
        max_fetch_batches = config.max_fetch_batches,
        "fetching comments"
    );

    let mut client = CommentThreadsClient::new(&config.api_url, &api_key, &args.video_id)
        .context("build comments API client")?;

    let out_path = crate::raw_store::raw_jsonl_path(
        &config.raw_output_dir(),
        &args.video_id,
        chrono::Local::now(),
    );
    let file = crate::raw_store::create_raw_file(&out_path)?;
    let mut out = BufWriter::new(file);

    let result = fetch_all_comments(&mut client, &mut out, config.max_fetch_batches);
    let flushed = out
        .flush()
        .with_context(|| format!("flush raw output: {}", out_path.display()));
    let summary = result?;
    flushed?;

    tracing::info!(
        threads = summary.threads,
        batches = summary.batches,
        stop = ?summary.stop,
        "finished fetching comments"
    );
    tracing::info!(path = %out_path.display(), "saved results");
    println!("{}", out_path.display());

    Ok(())
}
