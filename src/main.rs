mod config;
mod youtube;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use youtube::api::{Downloader, HttpDownloader};
use youtube::link::{MIX_PREFIX, PlaylistHandle};
use youtube::mix::MixPlaylistExtractor;
use youtube::models::StreamListingRecord;

#[derive(Debug, Parser)]
#[command(name = "ytmix", version, about = "Walk YouTube mix playlists from the command line")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the videos of a mix, following continuation pages.
    Mix {
        /// Mix watch URL, or a bare video id to seed `RD<id>`.
        seed: String,
        /// Pages to fetch (defaults to `mix.max_pages` from the config).
        #[arg(long)]
        pages: Option<u32>,
        /// Print one JSON record per line instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Dump the raw JSON of the first mix page.
    MixJson { seed: String },
    /// Print mix metadata.
    Info { seed: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let downloader = HttpDownloader::new(&cfg.http)?;
    let localization = cfg.localization.to_localization();

    match cli.command {
        Command::Mix { seed, pages, json } => {
            let handle = parse_seed(&seed)?;
            let mut mix = MixPlaylistExtractor::new(downloader, handle, localization);
            mix.fetch_page().await.context("fetch mix")?;

            let pages = pages.unwrap_or(cfg.mix.max_pages).max(1);
            let mut page = mix.initial_page().context("read first mix page")?;
            let mut n = 0usize;
            for i in 1..=pages {
                for rec in &page.items {
                    n += 1;
                    print_record(n, rec, json)?;
                }
                if !page.errors.is_empty() {
                    tracing::debug!(page = i, skipped = page.errors.len(), "page had unreadable items");
                }
                if i == pages {
                    break;
                }
                // Mixes never say they are done; a page we cannot continue from is the end.
                let next = std::mem::take(&mut page.next_page_url);
                page = match mix.get_page(Some(next.as_str())).await {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!(error = %e, "mix ended");
                        break;
                    }
                };
            }
        }
        Command::MixJson { seed } => {
            let handle = parse_seed(&seed)?;
            let url = format!("{}&pbj=1", handle.url());
            let v = downloader.fetch_json(&url, &localization).await?;
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
        Command::Info { seed } => {
            let handle = parse_seed(&seed)?;
            let mut mix = MixPlaylistExtractor::new(downloader, handle, localization);
            mix.fetch_page().await.context("fetch mix")?;
            println!("name:       {}", mix.name()?);
            println!("playlist:   {}", mix.handle().playlist_id());
            println!("thumbnail:  {}", mix.thumbnail_url()?);
            println!("streams:    {}", mix.stream_count());
            println!("uploader:   {}", or_none(mix.uploader_name()));
            println!("uploader url: {}", or_none(mix.uploader_url()));
            println!("avatar:     {}", or_none(mix.uploader_avatar_url()));
            println!("banner:     {}", or_none(mix.banner_url()));
            match mix.next_page_url() {
                Ok(u) => println!("next page:  {u}"),
                Err(e) => println!("next page:  none ({e})"),
            }
        }
    }

    Ok(())
}

fn parse_seed(seed: &str) -> anyhow::Result<PlaylistHandle> {
    let handle = if seed.contains("://") {
        PlaylistHandle::from_url(seed)?
    } else {
        PlaylistHandle::from_ids(seed, &format!("{MIX_PREFIX}{seed}"))?
    };
    Ok(handle)
}

fn or_none(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn print_record(n: usize, r: &StreamListingRecord, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(r)?);
        return Ok(());
    }
    let uploader = if r.uploader_name.is_empty() {
        "".to_string()
    } else {
        format!(" - {}", r.uploader_name)
    };
    let duration = r
        .duration_seconds
        .map(|s| format!(" [{}:{:02}]", s / 60, s % 60))
        .unwrap_or_default();
    println!("{n:02}. {}{uploader}{duration}  (video_id={})", r.title, r.video_id);
    Ok(())
}
