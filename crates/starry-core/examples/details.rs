//! Deep-link details example
//!
//! Resolves a content identifier against the start API and prints the result.
//!
//! Run with: STARRY_USER_TOKEN=... cargo run -p starry-core --example details -- shows/67890

use starry_core::{ApiConfig, CatalogClient, Video, VideoRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let id = std::env::args().nth(1).unwrap_or_else(|| "movies/12345".to_string());
    let token = std::env::var("STARRY_USER_TOKEN")?;

    let client = CatalogClient::new(ApiConfig::from_env()?)?;

    match client.fetch_video_details(&id, &token).await {
        Ok(Video::Show { title, episodes, .. }) => {
            println!("{title}: {} episodes", episodes.len());
            for episode in episodes {
                println!("  E{} {}", episode.number, episode.title);
            }
        }
        Ok(Video::Movie { title, description, .. }) => {
            println!("{title}\n  {description}");
        }
        Err(e) if e.is_recoverable() => {
            eprintln!("Retry later ({}): {e}", e.error_code());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
