/// Album Catalog CLI - browse and edit the catalog from a terminal
mod dialogs;

use anyhow::Context;
use catalog_client::{
    AlbumCache, CatalogClient, CatalogSession, ClientConfig, FileStore, KeyValueStore, ListSource,
    MemoryStore,
};
use catalog_core::{AlbumId, AlbumView};
use clap::{Parser, Subcommand};
use dialogs::TerminalDialogs;
use std::{path::PathBuf, process::ExitCode, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse and edit the album catalog", long_about = None)]
struct Cli {
    /// Catalog server URL
    #[arg(
        long,
        global = true,
        env = "CATALOG_URL",
        default_value = "http://localhost:5000"
    )]
    server: String,

    /// Offline cache file (defaults to the user cache directory)
    #[arg(long, global = true, env = "CATALOG_CACHE_FILE")]
    cache_file: Option<PathBuf>,

    /// Refetch when the cached list is older than this many seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    max_age: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List albums, from the cache when it is fresh
    List {
        /// Only albums whose band contains this text
        #[arg(long)]
        band: Option<String>,
        /// Only albums whose genre contains this text
        #[arg(long)]
        genre: Option<String>,
        /// Skip the cache and fetch from the server
        #[arg(long)]
        refresh: bool,
    },
    /// Add an album
    Add {
        #[arg(long)]
        band: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: String,
        #[arg(long)]
        genre: String,
        /// Name of an already uploaded cover
        #[arg(long, conflicts_with = "file")]
        cover: Option<String>,
        /// Image to upload as the cover
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Change an album's title
    EditTitle {
        id: AlbumId,
        /// New title; prompted for when omitted
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete an album
    Delete {
        id: AlbumId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Upload a cover image and print its stored name
    Upload { path: PathBuf },
    /// Forget the cached album list
    ClearCache,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_cli=warn,catalog_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = CatalogClient::new(ClientConfig::new(&cli.server))?;
    let cache = open_cache(cli.cache_file.clone())?
        .with_max_age(cli.max_age.map(Duration::from_secs));

    match cli.command {
        Commands::List {
            band,
            genre,
            refresh,
        } => {
            let mut session = CatalogSession::new(client, cache, TerminalDialogs::new(false));
            let filtered = band.is_some() || genre.is_some();

            let result = if filtered {
                session.search.band = band.unwrap_or_default();
                session.search.genre = genre.unwrap_or_default();
                session.search().await
            } else if refresh {
                session.clear_search().await
            } else {
                session.activate().await.map(|source| {
                    if source == ListSource::StaleCache {
                        eprintln!("Showing cached albums; the server could not be reached.");
                    }
                })
            };
            if result.is_err() {
                return Ok(ExitCode::FAILURE);
            }

            if session.albums().is_empty() {
                println!("No albums found.");
            }
            for album in session.albums() {
                println!("{}", format_album(album));
            }
        }
        Commands::Add {
            band,
            title,
            year,
            genre,
            cover,
            file,
        } => {
            let mut session = CatalogSession::new(client, cache, TerminalDialogs::new(false));
            if session.activate().await.is_err() {
                return Ok(ExitCode::FAILURE);
            }

            session.form.band = band;
            session.form.title = title;
            session.form.year = year;
            session.form.genre = genre;
            session.form.cover = cover.unwrap_or_default();
            session.form.file = file;

            match session.create().await {
                Ok(album) => println!("Added {}", format_album(&album)),
                Err(_) => return Ok(ExitCode::FAILURE),
            }
        }
        Commands::EditTitle { id, title } => {
            let dialogs = TerminalDialogs::new(false).with_title(title);
            let mut session = CatalogSession::new(client, cache, dialogs);
            if session.activate().await.is_err() {
                return Ok(ExitCode::FAILURE);
            }
            if find_album(session.albums(), id).is_none() {
                eprintln!("No album with id {}.", id);
                return Ok(ExitCode::FAILURE);
            }

            match session.edit_title(id).await {
                Ok(true) => {
                    if let Some(album) = find_album(session.albums(), id) {
                        println!("Updated {}", format_album(album));
                    }
                }
                Ok(false) => println!("Nothing changed."),
                Err(_) => return Ok(ExitCode::FAILURE),
            }
        }
        Commands::Delete { id, yes } => {
            let mut session = CatalogSession::new(client, cache, TerminalDialogs::new(yes));
            if session.activate().await.is_err() {
                return Ok(ExitCode::FAILURE);
            }
            if find_album(session.albums(), id).is_none() {
                eprintln!("No album with id {}.", id);
                return Ok(ExitCode::FAILURE);
            }

            match session.delete(id).await {
                Ok(true) => println!("Album deleted."),
                Ok(false) => println!("Kept album {}.", id),
                Err(_) => return Ok(ExitCode::FAILURE),
            }
        }
        Commands::Upload { path } => {
            let upload = client
                .covers()
                .upload(&path)
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;
            println!("{}", upload.filename);
            println!("{}", upload.cover_url);
        }
        Commands::ClearCache => {
            cache.clear()?;
            println!("Cache cleared.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Open the offline cache, falling back to memory when no cache directory
/// is known.
fn open_cache(path: Option<PathBuf>) -> anyhow::Result<AlbumCache> {
    let path = path.or_else(|| {
        dirs::cache_dir().map(|d| d.join("album-catalog").join("albums.json"))
    });

    let store: Box<dyn KeyValueStore> = match path {
        Some(path) => Box::new(
            FileStore::open(&path)
                .with_context(|| format!("Failed to open cache {}", path.display()))?,
        ),
        None => {
            tracing::warn!("No cache directory found, caching in memory only");
            Box::new(MemoryStore::new())
        }
    };

    Ok(AlbumCache::new(store))
}

fn find_album(albums: &[AlbumView], id: AlbumId) -> Option<&AlbumView> {
    albums.iter().find(|a| a.id() == id)
}

fn format_album(album: &AlbumView) -> String {
    let a = &album.album;
    let mut line = format!(
        "{:>4}  {} - {} ({}) [{}]",
        a.id, a.band, a.title, a.year, a.genre
    );
    if let Some(url) = &album.cover_url {
        line.push_str("  ");
        line.push_str(url);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Album;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_album() {
        let album = Album {
            id: 3,
            band: "AC/DC".into(),
            title: "Back in Black".into(),
            year: 1980,
            genre: "Hard Rock".into(),
            cover: Some("1700_bib.png".into()),
        }
        .with_cover_url("http://localhost:5000");

        assert_eq!(
            format_album(&album),
            "   3  AC/DC - Back in Black (1980) [Hard Rock]  http://localhost:5000/covers/1700_bib.png"
        );
    }

    #[test]
    fn test_find_album_by_id() {
        let albums: Vec<AlbumView> = [(1, "Master of Puppets"), (3, "Back in Black")]
            .into_iter()
            .map(|(id, title)| {
                Album {
                    id,
                    band: "Band".into(),
                    title: title.into(),
                    year: 1986,
                    genre: "Metal".into(),
                    cover: None,
                }
                .with_cover_url("http://localhost:5000")
            })
            .collect();

        assert_eq!(
            find_album(&albums, 3).map(|a| a.album.title.as_str()),
            Some("Back in Black")
        );
        assert!(find_album(&albums, 2).is_none());
        assert!(find_album(&[], 1).is_none());
    }

    #[test]
    fn test_add_rejects_cover_with_file() {
        let parsed = Cli::try_parse_from([
            "catalog", "add", "--band", "Slayer", "--title", "Reign in Blood", "--year", "1986",
            "--genre", "Thrash Metal", "--cover", "a.png", "--file", "b.png",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_explicit_cache_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("album-catalog");
        let cache = open_cache(Some(nested.join("albums.json"))).unwrap();
        assert!(cache.load().is_none());
        assert!(nested.is_dir());
    }
}
