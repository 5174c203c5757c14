//! WordDuel server binary.
//!
//! Usage: `wordduel-server [words.json]`
//!
//! The word list is a JSON array of accepted five-letter words. The bind
//! port comes from `$PORT` (default 4000); log filtering from
//! `$RUST_LOG` (default `info`).

use tracing_subscriber::EnvFilter;
use wordduel::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let words_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "words.json".to_string());
    let dictionary = Dictionary::from_file(&words_path)?;

    let port = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let server = WordDuelServerBuilder::new()
        .bind(&addr)
        .build(dictionary)
        .await?;

    tracing::info!(%addr, "WordDuel server running");
    server.run().await?;
    Ok(())
}
