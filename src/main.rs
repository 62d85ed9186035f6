use anyhow::Result;
use clap::Parser as ClapParser;
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use course_search::config::{MAX_AUTOCOMPLETE_LIMIT, MAX_SEARCH_LIMIT};
use course_search::corpus::{load_courses, CorpusHandle, CorpusProvider};
use course_search::models::{Algorithm, Programme};
use course_search::search::{autocomplete_courses, perform_search, SearchFilters};

fn build_filters(args: &Args) -> Option<SearchFilters> {
    let programmes = if args.programmes.is_empty() {
        None
    } else {
        // Unknown tags are dropped with a warning; if none survive the
        // filter matches nothing rather than silently widening
        let parsed: Vec<Programme> = args
            .programmes
            .iter()
            .filter_map(|tag| match tag.parse::<Programme>() {
                Ok(programme) => Some(programme),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .collect();
        Some(parsed)
    };

    let filters = SearchFilters {
        programmes,
        min_credits: args.min_credits,
        max_credits: args.max_credits,
    };
    (!filters.is_empty()).then_some(filters)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let handle = CorpusHandle::new();
    handle.install(load_courses(&args.corpus)?);
    if !handle.is_ready() {
        println!("No results found.");
        return Ok(());
    }
    let snapshot = handle.get_snapshot();
    let filters = build_filters(&args);

    if args.autocomplete {
        let limit = args.limit.clamp(1, MAX_AUTOCOMPLETE_LIMIT);
        let hits = autocomplete_courses(&snapshot, &args.query, limit, filters.as_ref());
        if args.format == "json" {
            println!("{}", serde_json::to_string_pretty(&hits)?);
        } else if hits.is_empty() {
            println!("No results found.");
        } else {
            for hit in &hits {
                println!(
                    "{:<10} {}  {}",
                    hit.code.green().bold(),
                    format!("{:.3}", hit.score).yellow(),
                    hit.title
                );
            }
        }
        return Ok(());
    }

    let algorithm = match args.algorithm.as_str() {
        "auto" => None,
        other => Some(other.parse::<Algorithm>().map_err(anyhow::Error::msg)?),
    };
    let limit = args.limit.clamp(1, MAX_SEARCH_LIMIT);
    let hits = perform_search(
        &snapshot,
        &args.query,
        algorithm,
        limit,
        args.max_distance,
        filters.as_ref(),
    );

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!("No results found.");
        return Ok(());
    }
    for hit in &hits {
        let credits = hit
            .credits
            .map(|c| format!("{c} cr."))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {}  {} ({})",
            hit.code.green().bold(),
            format!("{:.3}", hit.score).yellow(),
            hit.title,
            credits.dimmed()
        );
        if !hit.description.is_empty() {
            println!("           {}", hit.description.dimmed());
        }
    }
    Ok(())
}
