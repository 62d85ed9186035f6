use clap::Parser as ClapParser;
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(author, version, about = "Fast, fully local, ranked search engine for university course catalogs", long_about = None)]
pub struct Args {
    /// JSON corpus file produced by the catalog scraper
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Ranking algorithm ("auto" picks one from the query shape)
    #[arg(short = 'a', long = "algorithm", default_value = "hybrid", value_parser = ["hybrid", "bm25", "fuzzy", "auto"])]
    pub algorithm: String,

    /// Maximum number of results to return
    #[arg(short = 'l', long = "limit", default_value_t = 10)]
    pub limit: usize,

    /// Maximum edit distance for fuzzy matching (adaptive when omitted)
    #[arg(long = "max-distance")]
    pub max_distance: Option<usize>,

    /// Restrict results to programme prefixes (comma separated, e.g. LOG,INF)
    #[arg(short = 'p', long = "programmes", value_delimiter = ',')]
    pub programmes: Vec<String>,

    /// Keep only courses worth at least this many credits
    #[arg(long = "min-credits")]
    pub min_credits: Option<u32>,

    /// Keep only courses worth at most this many credits
    #[arg(long = "max-credits")]
    pub max_credits: Option<u32>,

    /// Complete a partial code or title instead of running a full search
    #[arg(long = "autocomplete")]
    pub autocomplete: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}
