use std::sync::Arc;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use rv_core::{logging, SearchConfig, UserIntent};
use rv_inference::{create_model, keywords::DEFAULT_KEYWORD_LANGUAGE, KeywordGenerator, VideoScorer, DEFAULT_GEMINI_MODEL};
use rv_search::{VideoSearch, YouTubeClient};
use rv_web::AppState;

mod client;
mod render;

use client::PipelineClient;

#[derive(Parser)]
#[command(author, version, about = "Find cooking videos that fit your mood, fridge and schedule", long_about = None)]
struct Cli {
    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service exposing the keyword, search and scoring endpoints
    Serve(ServeArgs),
    /// Ask a running service for recommendations and print them
    Recommend(RecommendArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "RV_BIND", default_value = "127.0.0.1:3000")]
    bind: String,
    #[arg(long, env = "RV_MODEL", default_value = "gemini", help = "Text model backend. Available models: gemini (default), dummy")]
    model: String,
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    model_name: String,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    youtube_api_key: String,
    #[arg(long, env = "CHANNEL_ID_RYUJI")]
    channel_ryuji: String,
    #[arg(long, env = "CHANNEL_ID_DAREUMA")]
    channel_dareuma: String,
    #[arg(long, env = "CHANNEL_ID_KOHKENTETSU")]
    channel_kohkentetsu: String,
    /// Language the generated search keyword is written in
    #[arg(long, env = "RV_KEYWORD_LANGUAGE", default_value = DEFAULT_KEYWORD_LANGUAGE)]
    keyword_language: String,
}

#[derive(Args)]
struct RecommendArgs {
    #[arg(long, env = "RV_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,
    /// How you feel today, e.g. "tired, want something easy"
    #[arg(long)]
    mood: String,
    /// Comma separated, e.g. "chicken, tomato"
    #[arg(long)]
    ingredients: String,
    /// Maximum cooking time in minutes
    #[arg(long, default_value_t = 30)]
    max_time: u32,
    /// Print the scored videos as JSON instead of a list
    #[arg(long)]
    json: bool,
}

fn build_state(args: ServeArgs) -> Result<AppState> {
    let config = rv_inference::Config {
        api_key: args.gemini_api_key,
        model_name: Some(args.model_name),
        base_url: None,
    };
    let model = create_model(&args.model, config)?;
    info!("🧠 Text model initialized (using {})", model.name());

    let search_config = SearchConfig::new([
        args.channel_ryuji,
        args.channel_dareuma,
        args.channel_kohkentetsu,
    ])?;
    let youtube = YouTubeClient::new(args.youtube_api_key)?;
    info!("📺 Searching {} channels", search_config.channel_ids().len());

    Ok(AppState {
        keywords: KeywordGenerator::new(model.clone()).with_language(args.keyword_language),
        search: VideoSearch::new(Arc::new(youtube), search_config),
        scorer: VideoScorer::new(model),
    })
}

async fn recommend(args: RecommendArgs) -> Result<()> {
    let client = PipelineClient::new(&args.server)?;
    let intent = UserIntent {
        mood: args.mood,
        ingredients: render::parse_ingredients(&args.ingredients),
        max_cooking_time: args.max_time,
    };

    let keyword = client
        .generate_keyword(&intent)
        .await
        .context("keyword generation")?;
    info!("🔑 Generated keyword: {}", keyword);

    let videos = client.search(&keyword).await.context("video search")?;
    info!("🔍 Found {} candidate videos", videos.len());

    let scored = client.score(&intent, videos).await.context("video scoring")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
    } else {
        print!("{}", render::render(&scored));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match cli.command {
        Commands::Serve(args) => {
            let bind = args.bind.clone();
            let state = build_state(args)?;
            rv_web::serve(state, &bind).await?;
        }
        Commands::Recommend(args) => recommend(args).await?,
    }

    Ok(())
}
