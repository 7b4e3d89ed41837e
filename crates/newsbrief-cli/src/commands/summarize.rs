use anyhow::{bail, Context, Result};
use serde_json::Value;
use tokio::sync::watch;

use newsbrief_core::{AppConfig, ArticleRef, SummaryOrchestrator, SummaryRequestState};

use crate::SummarizeArgs;

pub async fn run(config: &AppConfig, args: SummarizeArgs) -> Result<()> {
    let articles = collect_articles(args)?;
    if articles.is_empty() {
        bail!("No article given: pass --url/--title/... or --file");
    }

    let orchestrator = SummaryOrchestrator::from_config(config)?;
    let (progress_tx, mut progress_rx) = watch::channel(SummaryRequestState::Idle);

    let watcher = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let state = progress_rx.borrow_and_update().clone();
            tracing::debug!(state = %state, "Summary progress");
        }
    });

    let mut failed = 0;
    for article in &articles {
        let label = match article.key() {
            "" => "(untitled article)",
            key => key,
        };
        println!("== {}", label);

        match orchestrator.get_summary_with_progress(article, &progress_tx).await {
            Ok(summary) => println!("{}\n", summary),
            Err(e) => {
                failed += 1;
                let hint = if e.is_retryable() { " (retryable)" } else { "" };
                println!("Error: {}{}\n", e, hint);
            }
        }
    }

    drop(progress_tx);
    if let Err(e) = watcher.await {
        tracing::debug!(error = %e, "Progress watcher ended abnormally");
    }

    if failed > 0 {
        bail!("{} of {} summaries failed", failed, articles.len());
    }
    Ok(())
}

fn collect_articles(args: SummarizeArgs) -> Result<Vec<ArticleRef>> {
    if let Some(path) = args.file {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        return parse_articles(&raw).with_context(|| format!("parsing {}", path.display()));
    }

    let article = ArticleRef {
        url: args.url,
        id: args.id,
        title: args.title,
        description: args.description,
        content: args.content,
        ..ArticleRef::default()
    };

    if article == ArticleRef::default() {
        return Ok(Vec::new());
    }
    Ok(vec![article])
}

/// Accept either a single article object or an array of them
fn parse_articles(raw: &str) -> Result<Vec<ArticleRef>> {
    let value: Value = serde_json::from_str(raw)?;
    let articles = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<ArticleRef>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(articles)
}
