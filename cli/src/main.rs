use std::io::Write;

use clap::Parser;
use figma_cli::args::Args;
use figma_tracing::TracingBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    TracingBuilder::default()
        .level(args.log_level)
        .json(args.json)
        .build()?;

    let mut stdout = std::io::stdout().lock();
    figma_cli::run(args, &mut stdout).await?;
    stdout.flush()?;

    Ok(())
}
