use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use steamdepot_core::artwork::header_image;
use steamdepot_core::config::{ScanConfig, STEAM_DIR_ENV};
use steamdepot_core::format::{format_last_updated, format_size};
use steamdepot_core::library::list_library_paths;
use steamdepot_core::operations::{
    launch_app, open_install_dir, open_store_page, request_uninstall, validate_app,
};
use steamdepot_core::platform::resolve_base_path;
use steamdepot_core::{collect_from, InstalledApp, LibraryError, LibraryInfo};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "steamdepot")]
#[command(about = "List and launch installed Steam games")]
struct Args {
    /// Steam installation directory (skips auto-detection)
    #[arg(long, global = true, env = STEAM_DIR_ENV)]
    steam_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List installed games (default)
    List {
        /// Only show games whose name contains this text
        query: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show details for one game
    Show { id: u32 },
    /// Launch a game through Steam
    Launch { id: u32 },
    /// Open a game's store page
    Store { id: u32 },
    /// Ask Steam to verify a game's files
    Validate { id: u32 },
    /// Ask Steam to uninstall a game
    Uninstall { id: u32 },
    /// Open a game's install folder
    Open { id: u32 },
    /// Print the Steam directory and its library folders
    Paths,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = ScanConfig {
        steam_dir: args.steam_dir,
        ..ScanConfig::default()
    };

    match args.command.unwrap_or(Command::List { query: None, json: false }) {
        Command::List { query, json } => list(&config, query.as_deref(), json),
        Command::Show { id } => show(&config, id),
        Command::Launch { id } => launch_app(id).context("Failed to launch game"),
        Command::Store { id } => open_store_page(id).context("Failed to open store page"),
        Command::Validate { id } => validate_app(id).context("Failed to validate game"),
        Command::Uninstall { id } => request_uninstall(id).context("Failed to request uninstall"),
        Command::Open { id } => open_folder(&config, id),
        Command::Paths => paths(&config),
    }
}

fn steam_dir(config: &ScanConfig) -> Result<PathBuf> {
    let base = resolve_base_path(config)?.ok_or(LibraryError::NotFound)?;
    Ok(base)
}

fn list(config: &ScanConfig, query: Option<&str>, json: bool) -> Result<()> {
    let base = steam_dir(config)?;
    let info = collect_from(&base, config);
    print!("{}", render_list(&info, query, json)?);
    Ok(())
}

/// Filters `info` by `query` and renders the hits as JSON or a table.
fn render_list(info: &LibraryInfo, query: Option<&str>, json: bool) -> Result<String> {
    let hits = info.search(query.unwrap_or(""));
    let filtered = LibraryInfo::from_apps(hits.into_iter().cloned().collect());

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&filtered)?));
    }

    if filtered.is_empty() {
        return Ok("No games found\n".to_string());
    }

    let mut out = String::new();
    for app in &filtered.apps {
        out.push_str(&format!(
            "{:>8}  {:<40}  {:>10}  {}\n",
            app.id,
            app.name,
            format_size(app.size_on_disk),
            format_last_updated(app.last_updated)
        ));
    }
    out.push_str(&format!(
        "\n{} games, {} total\n",
        filtered.count,
        format_size(filtered.total_size)
    ));
    Ok(out)
}

fn show(config: &ScanConfig, id: u32) -> Result<()> {
    let base = steam_dir(config)?;
    let info = collect_from(&base, config);
    let app: &InstalledApp = info.find(id).context(format!("No installed game with id {}", id))?;

    println!("{} ({})", app.name, app.id);
    println!("  Install dir:  {}", app.install_dir.display());
    println!("  Size:         {}", format_size(app.size_on_disk));
    println!("  Last updated: {}", format_last_updated(app.last_updated));
    println!("  Installed:    {}", if app.is_fully_installed() { "yes" } else { "partial" });
    println!("  Artwork:      {}", header_image(&base, app.id).url());
    Ok(())
}

fn paths(config: &ScanConfig) -> Result<()> {
    let base = steam_dir(config)?;
    println!("Steam: {}", base.display());
    for library in list_library_paths(&base) {
        println!("  {}", library.display());
    }
    Ok(())
}

fn open_folder(config: &ScanConfig, id: u32) -> Result<()> {
    let base = steam_dir(config)?;
    let info = collect_from(&base, config);
    let app = info.find(id).context(format!("No installed game with id {}", id))?;
    open_install_dir(app).context("Failed to open install folder")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> LibraryInfo {
        let app = |id: u32, name: &str, size: u64| InstalledApp {
            id,
            name: name.to_string(),
            install_dir: PathBuf::from(format!("/steam/steamapps/common/{}", name)),
            size_on_disk: size,
            last_updated: None,
            state_flags: None,
        };
        LibraryInfo::from_apps(vec![app(10, "Counter-Strike", 1024), app(570, "Dota 2", 2048)])
    }

    #[test]
    fn json_output_honours_query() {
        let out = render_list(&library(), Some("dota"), true).unwrap();
        let parsed: LibraryInfo = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.count, 1);
        assert_eq!(parsed.total_size, 2048);
        assert_eq!(parsed.apps[0].id, 570);
    }

    #[test]
    fn json_output_without_query_lists_everything() {
        let out = render_list(&library(), None, true).unwrap();
        let parsed: LibraryInfo = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, library());
    }

    #[test]
    fn table_reports_filtered_totals() {
        let out = render_list(&library(), Some("COUNTER"), false).unwrap();
        assert!(out.contains("Counter-Strike"));
        assert!(!out.contains("Dota 2"));
        assert!(out.ends_with("1 games, 1 KB total\n"));
    }

    #[test]
    fn no_hits_shows_empty_state() {
        assert_eq!(render_list(&library(), Some("portal"), false).unwrap(), "No games found\n");
        assert_eq!(
            render_list(&LibraryInfo::default(), None, false).unwrap(),
            "No games found\n"
        );
    }
}
