//! Command-line interface for the `pathwise` recommendation engine.
//!
//! Loads user, course, and trend snapshots from JSON files, runs the
//! engine or the skill extractor, and prints results as pretty JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pathwise_core::{Course, UserProfile};
use pathwise_engine::{
    EngineConfig, InMemoryCourseStore, InMemoryUserStore, MarketTrends, RecommendOptions,
    RecommendationEngine, StaticMarketData,
};
use pathwise_extract::{ExtractOptions, SkillExtractor};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Debug, Parser)]
#[command(
    name = "pathwise",
    about = "Hybrid course recommendations and resume skill extraction"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recommend courses for one user from JSON snapshots
    Recommend {
        /// JSON file holding an array of user profiles
        #[arg(long, value_name = "FILE")]
        users: PathBuf,
        /// JSON file holding an array of courses
        #[arg(long, value_name = "FILE")]
        courses: PathBuf,
        /// User id to recommend for
        #[arg(long, value_name = "ID")]
        user: String,
        /// Optional JSON file holding market trends
        #[arg(long, value_name = "FILE")]
        trends: Option<PathBuf>,
        /// Optional TOML engine configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Maximum number of recommendations
        #[arg(long)]
        limit: Option<usize>,
        /// Diversity factor in [0, 1]
        #[arg(long)]
        diversity: Option<f64>,
    },
    /// Extract skills from resume or profile text
    Extract {
        /// Read text from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
        /// Drop skills below this confidence
        #[arg(long, default_value_t = 0.3)]
        min_confidence: f64,
        /// Keep at most this many skills
        #[arg(long, default_value_t = 50)]
        max_skills: usize,
        /// Include the surrounding text snippet per skill
        #[arg(long, default_value_t = false)]
        context: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Recommend {
            users,
            courses,
            user,
            trends,
            config,
            limit,
            diversity,
        } => recommend(
            &users, &courses, &user, trends, config, limit, diversity,
        ),
        Commands::Extract {
            file,
            min_confidence,
            max_skills,
            context,
        } => extract(file, min_confidence, max_skills, context),
    }
}

fn recommend(
    users_path: &Path,
    courses_path: &Path,
    user_id: &str,
    trends_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    limit: Option<usize>,
    diversity: Option<f64>,
) -> anyhow::Result<()> {
    let users: Vec<UserProfile> = read_json(users_path)?;
    let courses: Vec<Course> = read_json(courses_path)?;
    let trends: MarketTrends = match trends_path {
        Some(path) => read_json(&path)?,
        None => MarketTrends::default(),
    };
    let config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_toml_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let engine = RecommendationEngine::new(
        Arc::new(InMemoryUserStore::new(users)),
        Arc::new(InMemoryCourseStore::new(courses)),
        Arc::new(StaticMarketData::new(trends)),
    )
    .with_config(config);

    let options = RecommendOptions {
        limit,
        diversity_factor: diversity,
    };
    let recommendations = Runtime::new()?.block_on(engine.recommend(user_id, options))?;
    println!("{}", serde_json::to_string_pretty(&recommendations)?);
    Ok(())
}

fn extract(
    file: Option<PathBuf>,
    min_confidence: f64,
    max_skills: usize,
    context: bool,
) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };

    let extractor = SkillExtractor::new();
    let options = ExtractOptions {
        min_confidence,
        max_skills,
        include_context: context,
    };
    let skills = extractor.extract(&text, &options);
    println!("{}", serde_json::to_string_pretty(&skills)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
