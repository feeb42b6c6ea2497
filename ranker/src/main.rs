use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ranker::{load_pages, SearchEngine};
use sift_core::EngineConfig;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Rank a crawled corpus by PageRank authority and TF-IDF relevance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the most authoritative pages by PageRank
    Rank {
        #[command(flatten)]
        engine: EngineArgs,
        /// Number of pages to print
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Score pages against a free-text query
    Search {
        #[command(flatten)]
        engine: EngineArgs,
        /// Query text; tokenized like page bodies
        #[arg(long)]
        query: String,
        /// Maximum number of hits
        #[arg(long, default_value_t = 10)]
        k: usize,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Input path (JSON/JSONL file or directory of them)
    #[arg(long)]
    input: String,
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<String>,
    /// PageRank decay factor in (0, 1)
    #[arg(long)]
    decay: Option<f64>,
    /// PageRank convergence threshold
    #[arg(long)]
    epsilon: Option<f64>,
    /// PageRank iteration cap
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Keep words unstemmed when tokenizing page bodies and queries
    #[arg(long, default_value_t = false)]
    no_stem: bool,
}

impl EngineArgs {
    fn resolve(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_path(path)?,
            None => EngineConfig::default(),
        };
        if let Some(decay) = self.decay {
            config.pagerank.decay = decay;
        }
        if let Some(epsilon) = self.epsilon {
            config.pagerank.epsilon = epsilon;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.pagerank.max_iterations = max_iterations;
        }
        if self.no_stem {
            config.tokenizer.stem = false;
        }
        config.validate()?;
        Ok(config)
    }

    fn build(&self) -> Result<SearchEngine> {
        let config = self.resolve()?;
        let pages = load_pages(&self.input, config.tokenizer)?;
        SearchEngine::build(&pages, &config)
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { engine, top } => {
            let engine = engine.build()?;
            let pages = engine.top_pages(top)?;
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        Commands::Search { engine, query, k } => {
            let engine = engine.build()?;
            let response = engine.search(&query, k)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}
