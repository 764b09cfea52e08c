//! Command-line shell: fetch an article (or read a saved page), analyze it and
//! print title, summary, label and the detailed scores.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use article_insight::devlog::init_cli_tracing;
use article_insight::{
    AnalysisResult, Analyzer, HttpFetcher, InsightConfig, PageFetcher, RawDocument,
};

#[derive(Parser, Debug)]
#[command(name = "insight", version, about = "Summarize a web article and score its sentiment")]
struct Cli {
    /// Article URL (also recorded as the source when --file is given)
    #[arg(required_unless_present = "file")]
    url: Option<String>,

    /// Analyze a saved HTML file instead of fetching
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Summary length in sentences (defaults to the configured count)
    #[arg(long = "sentences", short = 'n')]
    sentences: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn render(result: &AnalysisResult) -> String {
    let s = &result.sentiment_scores;
    format!(
        "Title: {}\n\nSummary:\n{}\n\nSentiment: {}\n\nDetailed Sentiment Scores:\n  \
         neg: {:.4}\n  neu: {:.4}\n  pos: {:.4}\n  compound: {:.4}",
        result.title,
        result.summary.text,
        result.sentiment_label,
        s.neg,
        s.neu,
        s.pos,
        s.compound
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_cli_tracing("article_insight=info,warn");

    let cli = Cli::parse();
    let cfg = InsightConfig::from_toml().context("loading configuration")?;
    let analyzer = Analyzer::new(&cfg);

    let doc = match (&cli.file, &cli.url) {
        (Some(path), url) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let source = url.clone().unwrap_or_else(|| path.display().to_string());
            RawDocument::new(source, html)
        }
        (None, Some(url)) => {
            let fetcher = HttpFetcher::new(&cfg.fetch).context("building http client")?;
            fetcher
                .fetch(url)
                .await
                .with_context(|| format!("fetching {url}"))?
        }
        (None, None) => anyhow::bail!("either a URL or --file is required"),
    };

    let n = cli
        .sentences
        .unwrap_or_else(|| analyzer.default_sentence_count());
    let result = analyzer
        .analyze_document(&doc, n)
        .context("analyzing article")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render(&result));
    }
    Ok(())
}
