use anyhow::{Context, Result};
use freesound::{Client, DownloadPack};
use std::path::Path;

// Usage: download_pack <pack id> <authorization code>
//
// The authorization code comes from visiting the URL printed when it is missing.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let client = Client::from_env()?.with_progress(true);

    let mut args = std::env::args().skip(1);
    let pack_id: u64 = args
        .next()
        .context("missing pack id")?
        .parse()
        .context("pack id must be a number")?;

    let Some(code) = args.next() else {
        println!(
            "Authorize this application, then re-run with the code:\n{}",
            client.authorization_url(None)
        );
        return Ok(());
    };

    let tokens = client.redeem_authorization_code(&code)?;
    let tokens = tokens.into_results().context("authorization code was rejected")?;

    let mut query = DownloadPack::new(pack_id, tokens.access_token);
    let target = format!("pack-{}.zip", pack_id);
    let written = client.download(&mut query, Path::new(&target))?;
    println!("saved {}", written.display());

    Ok(())
}
