//! Product Review Sentiment Analyzer
//!
//! Serves the review dashboard or analyzes reviews from the command line.

use anyhow::Context;
use clap::{Parser, Subcommand};
use review_analyzer::{
    config::Config,
    report::{sample_text, write_csv, Analysis, Analyzer, CSV_FILE_NAME},
    sentiment::Sentiment,
    server::run_server,
};
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "review-analyzer")]
#[command(about = "Sentiment analysis dashboard for product reviews")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to config.toml, config.yaml or ~/.config/review-analyzer/config.toml)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,
    },
    /// Analyze reviews, one per line
    Analyze {
        /// Input file, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Also write the classified reviews to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Number of keywords to show
        #[arg(short, long)]
        top: Option<usize>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the sample reviews
    Sample,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Commands::Serve { port, host } => serve(config, port, host).await,
        Commands::Analyze {
            input,
            csv,
            top,
            json,
        } => analyze(&config, &input, csv, top, json),
        Commands::Sample => {
            println!("{}", sample_text());
            Ok(())
        }
    }
}

async fn serve(mut config: Config, port: Option<u16>, host: Option<String>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    tracing::info!("Starting review analyzer dashboard");
    run_server(&config).await
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read reviews from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn analyze(
    config: &Config,
    input: &str,
    csv: Option<PathBuf>,
    top: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let text = read_input(input)?;

    let mut analyzer = Analyzer::from_config(config);
    if let Some(top) = top {
        analyzer = analyzer.with_top_n(top);
    }

    let analysis = analyzer.analyze(&text)?;

    if let Some(path) = csv {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_csv(BufWriter::new(file), &analysis.results)?;
        tracing::info!("Results written to {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn print_analysis(analysis: &Analysis) {
    let summary = &analysis.summary;

    println!("\n📊 Sentiment Analysis Results\n");
    println!("Total Reviews: {}", summary.total);
    for sentiment in Sentiment::ALL {
        println!(
            "  {:<10} {:>5} ({:.1}%)",
            sentiment.as_str(),
            summary.count(sentiment),
            summary.percentage(sentiment)
        );
    }

    println!("\n🔑 Top Keywords:\n");
    println!("{:<20} {:>9}", "Keyword", "Frequency");
    println!("{}", "-".repeat(30));
    for keyword in &analysis.keywords {
        println!("{:<20} {:>9}", keyword.token, keyword.frequency);
    }

    println!("\n📝 Detailed Results:\n");
    println!("{:<60} {:<10} {:>7}", "Review", "Sentiment", "Score");
    println!("{}", "-".repeat(79));
    for result in &analysis.results {
        println!(
            "{:<60} {:<10} {:>7.3}",
            truncate(&result.review, 60),
            result.sentiment.as_str(),
            result.score
        );
    }

    println!("\nRun {} at {}", analysis.run_id, analysis.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Use --csv {} to save the results.", CSV_FILE_NAME);
}
