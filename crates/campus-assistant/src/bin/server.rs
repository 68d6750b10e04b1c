//! Assistant server binary
//!
//! Run with: cargo run -p campus-assistant --bin campus-assistant-server

use campus_assistant::{
    config::AssistantConfig,
    logging::{self, RequestLogger},
    server::{shutdown_signal, AssistantServer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing()?;

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                     Campus Assistant                      ║
║        ITMO University Q&A with Source Citations          ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    let config = AssistantConfig::load()?;
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - LLM endpoint: {}", config.llm.base_url);
    tracing::info!("  - Search results per question: {}", config.pipeline.max_results);
    tracing::info!("  - Search domains: {}", config.pipeline.include_domains.join(", "));
    tracing::info!("  - Request log: {}", config.logging.file.display());

    let (logger, worker) = RequestLogger::start(&config.logging)?;
    let server = AssistantServer::new(config, logger)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/request - Ask a question");
    println!("\nPress Ctrl+C to stop\n");

    let result = server.start(shutdown_signal()).await;

    // Drain queued request log lines whether or not the server exited cleanly
    worker.shutdown().await;

    result?;
    Ok(())
}
