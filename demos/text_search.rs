use anyhow::Result;
use freesound::{Client, PagingQuery, Query, SortOrder, TextSearch};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Configure credentials via env vars or a `.freesoundrc` file.
    let client = Client::from_env()?;

    let mut search = TextSearch::new("rain on tin roof")
        .with_sort_order(SortOrder::RatingDescending)
        .with_fields(["id", "name", "username", "duration"])
        .with_page_size(10);

    client.execute_query(&mut search)?;
    for _ in 0..3 {
        let Some(response) = search.response() else {
            break;
        };
        if response.is_error_response() {
            anyhow::bail!(
                "search failed: HTTP {} {}",
                response.status_code(),
                response.error_details().unwrap_or("")
            );
        }
        if let Some(page) = response.results() {
            for sound in &page.results {
                println!(
                    "{:>8} {:<40} {:>6.1}s by {}",
                    sound.id,
                    sound.name.as_deref().unwrap_or("?"),
                    sound.duration.unwrap_or_default(),
                    sound.username.as_deref().unwrap_or("?")
                );
            }
        }
        if !search.has_next_page() {
            break;
        }
        client.next_page(&mut search)?;
    }

    client.shutdown();
    Ok(())
}
