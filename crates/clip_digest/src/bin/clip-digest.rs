use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clip_digest::gemini::GeminiClient;
use clip_digest::server::{build_router, AppState};
use clip_digest::tracing::init_tracing_subscriber;
use clip_digest::{SummaryPipeline, SummaryPipelineBuilder};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use yt_transcript::{TranscriptSource, VideoId, YtTranscriptClient};

#[derive(Parser)]
#[command(name = "clip-digest", about = "Summarizes YouTube videos from their transcripts")]
struct Cli {
    /// API key for the Gemini generative service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: String,

    /// Maximum generative-service submissions per rate window
    #[arg(long, env = "RATE_LIMIT", default_value = "60")]
    rate_limit: u32,

    /// Rate window duration in seconds
    #[arg(long, env = "RATE_WINDOW_SECS", default_value = "60")]
    rate_window_secs: u64,

    /// Maximum transcript chunk size in bytes
    #[arg(long, env = "MAX_CHUNK_SIZE", default_value = "5000")]
    max_chunk_size: usize,

    /// Maximum chunks summarized concurrently
    #[arg(long, env = "MAX_CONCURRENCY", default_value = "4")]
    max_concurrency: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "PORT", default_value = "3000")]
        port: u16,
    },
    /// Summarize a single video and print the result to stdout
    Summarize {
        /// Video URL or bare video id
        video_url: String,
    },
}

fn build_pipeline(cli: &Cli, cancel: CancellationToken) -> SummaryPipeline<GeminiClient> {
    SummaryPipelineBuilder::new()
        .summarizer(GeminiClient::new(&cli.gemini_api_key))
        .rate_limit(cli.rate_limit, Duration::from_secs(cli.rate_window_secs))
        .max_chunk_size(cli.max_chunk_size)
        .max_concurrency(cli.max_concurrency)
        .cancellation_token(cancel)
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let cancel = CancellationToken::new();
    let pipeline = Arc::new(build_pipeline(&cli, cancel.clone()));

    match cli.command {
        Command::Serve { port } => {
            let state = AppState::new(pipeline, Arc::new(YtTranscriptClient::new()));
            let router = build_router(state);

            let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
            tracing::info!(port, "Server started");

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal(cancel))
                .await?;
        }
        Command::Summarize { video_url } => {
            let video_id = VideoId::parse(&video_url)?;
            let transcript = YtTranscriptClient::new().fetch_transcript(&video_id).await?;

            let summary = pipeline.summarize_text(&transcript.joined_text()).await?;
            println!("{summary}");
        }
    }

    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }

    tracing::info!("Shutting down, cancelling in-flight summarization");
    cancel.cancel();
}
