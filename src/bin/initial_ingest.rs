use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;

use university_assistant::config::Settings;
use university_assistant::ingest::ingest_all_pdfs;
use university_assistant::openwebui::OpenWebUiClient;

/// Bulk-upload a directory tree of PDFs into Open WebUI.
#[derive(Debug, Parser)]
#[command(name = "initial-ingest", version)]
struct Args {
    /// Root directory to search for PDFs
    #[arg(env = "PDF_DIR")]
    pdf_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    let settings = Settings::from_env()?;
    let client = OpenWebUiClient::new(&settings)?;

    println!("Starting bulk ingestion of PDFs...");
    let report = ingest_all_pdfs(&client, &args.pdf_dir).await;
    log::info!("{} uploaded, {} failed", report.uploaded, report.failed);
    println!("Done! 😊");

    Ok(())
}
