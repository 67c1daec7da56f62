//! Amora - companion chat assistant
//!
//! Routes each chat message through a fixed pipeline: mood detection,
//! task detection, memory retrieval + response generation (or task
//! dispatch), then safety filtering. LLM-backed via Groq's Llama 3.3
//! endpoint when a key is available; fully rule-based otherwise.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use amora::config::{Config, Strictness};
use amora::generate::ResponseGenerator;
use amora::memory::MemoryStore;
use amora::mood::MoodDetector;
use amora::persona::PERSONA_NAME;
use amora::pipeline::Pipeline;
use amora::provider::GroqClient;
use amora::provider::groq::DEFAULT_MODEL;
use amora::repl::{self, Repl};
use amora::safety::SafetyFilter;
use amora::surprise::DatePlanner;

#[derive(Parser)]
#[command(name = "amora")]
#[command(about = "Companion chat assistant with a mood-aware response pipeline")]
struct Args {
    /// Run the fixed sample messages instead of the interactive chat
    #[arg(long)]
    test: bool,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY")]
    api_key: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Safety filter strictness (low / medium / high)
    #[arg(long)]
    strictness: Option<Strictness>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env (from ~/.amora/.env or current dir)
    let env_path = dirs::home_dir()
        .map(|h| h.join(".amora").join(".env"))
        .filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }

    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Load config file (~/.amora/config.toml)
    let config = Config::load();

    // Resolve values: CLI args > env vars (handled by clap) > config file
    let api_key = args
        .api_key
        .or(config.groq_api_key)
        .filter(|k| !k.trim().is_empty())
        .or_else(prompt_for_key);

    let model = args
        .model
        .or(config.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let strictness = args
        .strictness
        .or_else(|| config.strictness.as_deref().and_then(|s| s.parse().ok()))
        .unwrap_or_default();

    println!("{}", "=".repeat(60));
    println!("💕 {PERSONA_NAME} - your companion");
    println!("{}", "=".repeat(60));
    println!();

    // One handle, built once; every LLM-consuming collaborator is
    // constructed in its LLM or rules variant right here, never by
    // checking for a key per call.
    let pipeline = match api_key {
        Some(key) => {
            let client = Arc::new(GroqClient::new(key, model));
            tracing::info!(model = client.model(), "LLM backend connected");
            println!("✅ {} connected.", client.model());
            Pipeline::new(
                MoodDetector::llm(client.clone()),
                MemoryStore::new(),
                ResponseGenerator::llm(client.clone()),
                DatePlanner::llm(client),
                SafetyFilter::new(strictness),
            )
        }
        None => {
            tracing::warn!("no API key available, running rule-based");
            println!("⚠️  Running in fallback mode (no LLM). Set GROQ_API_KEY for the full experience.");
            Pipeline::new(
                MoodDetector::rules(),
                MemoryStore::new(),
                ResponseGenerator::rules(),
                DatePlanner::rules(),
                SafetyFilter::new(strictness),
            )
        }
    };
    println!();

    if args.test {
        repl::run_samples(&pipeline).await
    } else {
        Repl::new(pipeline)?.run().await
    }
}

/// One interactive chance to provide a key; an empty answer means
/// degraded mode, never a fatal error.
fn prompt_for_key() -> Option<String> {
    println!("No GROQ_API_KEY found in environment.");
    println!("Enter one now (press Enter to skip):");
    print!("API Key: ");
    std::io::stdout().flush().ok()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line).ok()?;

    let key = line.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
