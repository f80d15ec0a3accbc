use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use nt_core::{
    config::cap_pages, view, Counts, DateRange, PaginationController, ScoredArticle, SearchConfig,
    SearchOutcome, SentimentClassifier, SourceFilter,
};
use nt_storage::{export, export_filename, ExportFormat, SessionStore};
use nt_web::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "News search with sentiment breakdowns", long_about = None)]
pub struct Cli {
    /// Interface language passed to the search provider
    #[arg(long, global = true, env = "NT_LANG", default_value = nt_core::config::DEFAULT_LANG)]
    lang: String,
    /// Region (country code) passed to the search provider
    #[arg(long, global = true, env = "NT_REGION", default_value = nt_core::config::DEFAULT_REGION)]
    region: String,
    #[arg(long, global = true, env = "NT_MODEL", default_value = "lexicon", help = "Sentiment model. Available models: lexicon (default), dummy")]
    model: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard API
    Serve {
        #[arg(long, env = "NT_BIND", default_value = "127.0.0.1:3000")]
        bind: String,
    },
    /// Run one search and print the sentiment breakdown
    Search {
        query: String,
        /// First publication date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last publication date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Result pages to merge before reporting
        #[arg(long, default_value_t = nt_core::config::DEFAULT_MAX_PAGES)]
        pages: u32,
        /// Only report these sources; repeat for several
        #[arg(long = "source")]
        sources: Vec<String>,
        #[arg(long, value_parser = parse_format)]
        export: Option<ExportFormat>,
        /// Directory the export is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: nt_core::Error| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = SearchConfig::default()
        .with_lang(cli.lang.clone())
        .with_region(cli.region.clone());
    let scorer = nt_inference::create_scorer(Some(nt_inference::Config::with_model(cli.model.clone())))?;
    let classifier = SentimentClassifier::new(scorer);
    let provider = nt_scrappers::create_provider("google")?;
    info!("🦗 Search provider ready: {}", provider.name());

    match cli.command {
        Commands::Serve { bind } => {
            let sessions = Arc::new(SessionStore::new(provider));
            nt_web::serve(AppState::new(sessions, classifier, config), &bind).await?;
        }
        Commands::Search { query, start, end, pages, sources, export: format, out } => {
            let range = DateRange::new(start, end)?;
            let request = config.request(query.clone(), range);
            let mut controller = PaginationController::new(provider);

            info!("🔎 Searching \"{}\" from {} to {}", query, start, end);
            match controller.prefetch(request, cap_pages(pages)).await? {
                SearchOutcome::NoResults { reason } => {
                    println!("No results: {:?}", reason);
                    return Ok(());
                }
                SearchOutcome::Loaded { page, new_count } => {
                    info!("📰 {} articles over {} page(s)", new_count, page);
                }
            }

            let filter: SourceFilter = sources.into_iter().collect();
            let view = view(controller.state(), &filter, &classifier);
            print_articles(&view.articles);
            print_counts(&view.counts);

            if let Some(format) = format {
                let bytes = export(&view.articles, format)?;
                let path = out.join(export_filename(&query, format, Local::now().date_naive()));
                std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
                info!("💾 Exported {} rows to {}", view.articles.len(), path.display());
            }
        }
    }

    Ok(())
}

fn print_articles(articles: &[ScoredArticle]) {
    for article in articles {
        let record = &article.record;
        println!(
            "[{:<8}] {:+.2}  {} ({}, {})",
            article.sentiment.as_str(),
            article.polarity,
            record.title,
            record.source,
            record.published_date
        );
    }
}

fn print_counts(counts: &Counts) {
    let share = counts.by_sentiment.percentages();
    println!();
    println!("Total: {}", counts.total);
    println!(
        "Positive {} ({:.1}%)  Neutral {} ({:.1}%)  Negative {} ({:.1}%)",
        counts.by_sentiment.positive,
        share.positive,
        counts.by_sentiment.neutral,
        share.neutral,
        counts.by_sentiment.negative,
        share.negative
    );
    for (source, by_sentiment) in &counts.by_source_by_sentiment {
        println!(
            "  {:<30} +{} ={} -{}",
            source, by_sentiment.positive, by_sentiment.neutral, by_sentiment.negative
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_arguments() {
        let cli = Cli::try_parse_from([
            "nt", "--region", "US", "search", "dharavi", "--start", "2025-01-01", "--end", "2025-04-29",
            "--source", "The Hindu", "--source", "Mint", "--export", "excel",
        ])
        .unwrap();
        assert_eq!(cli.region, "US");
        match cli.command {
            Commands::Search { query, start, pages, sources, export, out, .. } => {
                assert_eq!(query, "dharavi");
                assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
                assert_eq!(pages, 3);
                assert_eq!(sources, vec!["The Hindu", "Mint"]);
                assert_eq!(export, Some(ExportFormat::Xlsx));
                assert_eq!(out, PathBuf::from("."));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        let base = ["nt", "search", "q", "--start", "2025-01-01", "--end"];
        assert!(Cli::try_parse_from(base.iter().copied().chain(["2025-13-01"])).is_err());
        assert!(Cli::try_parse_from(base.iter().copied().chain(["2025-02-01", "--export", "pdf"])).is_err());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["nt", "serve"]).unwrap();
        assert_eq!(cli.model, "lexicon");
        assert!(matches!(cli.command, Commands::Serve { .. }));
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
