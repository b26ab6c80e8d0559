//! Terminal front end for the note viewer.
//!
//! # Responsibility
//! - Load one payload from a file or URL into a `NoteLibrary`.
//! - Print the month-grouped list, or one selected note.
//! - Keep all parsing and ordering inside `noteview_core`.

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use noteview_core::{
    check_source_url, default_log_level, init_logging, FetchConfig, HttpNoteFetcher, Note,
    NoteLibrary, DEFAULT_FETCH_TIMEOUT_SECS,
};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "noteview", version, about = "Browse exported note collections")]
#[command(group(ArgGroup::new("source").required(true).args(["file", "url"])))]
struct Cli {
    /// Payload file to load.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Payload URL to fetch.
    #[arg(long)]
    url: Option<String>,
    /// Case-insensitive title filter.
    #[arg(long, default_value = "")]
    search: String,
    /// Show one note by id instead of the list.
    #[arg(long)]
    select: Option<String>,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
    #[arg(long, env = "NOTEVIEW_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// Ignore proxy settings from the environment.
    #[arg(long)]
    no_proxy: bool,
    #[arg(long, env = "NOTEVIEW_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling logs; logging is off when unset.
    #[arg(long, env = "NOTEVIEW_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let library = NoteLibrary::new();
    load(&library, &cli)?;

    match &cli.select {
        Some(id) => print_selected(&library, id, cli.json),
        None => {
            print_list(&library, &cli.search, cli.json)?;
            Ok(())
        }
    }
}

fn load(library: &NoteLibrary, cli: &Cli) -> Result<()> {
    let collection = match (&cli.file, &cli.url) {
        (Some(path), _) => library
            .load_file(path)
            .with_context(|| format!("failed to load `{}`", path.display()))?,
        (None, Some(url)) => {
            let url = check_source_url(url)?;
            let fetcher = HttpNoteFetcher::new(&FetchConfig {
                timeout: Duration::from_secs(cli.timeout_secs),
                use_system_proxy: !cli.no_proxy,
            })?;
            library
                .load_url(&fetcher, url.as_str())
                .with_context(|| format!("failed to load `{url}`"))?
        }
        (None, None) => bail!("either --file or --url is required"),
    };
    log::info!(
        "event=cli_load module=cli status=ok notes={}",
        collection.len()
    );
    Ok(())
}

fn print_list(library: &NoteLibrary, query: &str, as_json: bool) -> Result<()> {
    let snapshot = library.snapshot();
    let groups = snapshot.grouped(query);

    if as_json {
        let body: Vec<_> = groups
            .iter()
            .map(|group| json!({ "month": group.key, "notes": group.notes }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if groups.is_empty() {
        let message = if query.is_empty() {
            "No notes yet"
        } else {
            "No notes found"
        };
        println!("{message}");
        return Ok(());
    }

    for group in &groups {
        println!("{}", group.key.to_uppercase());
        for &note in &group.notes {
            let normalized = note.normalized();
            println!(
                "  {:<48} {:>12} {:>12}",
                display_title(note),
                normalized.day_only,
                normalized.display_time
            );
        }
        println!();
    }
    Ok(())
}

fn print_selected(library: &NoteLibrary, id: &str, as_json: bool) -> Result<()> {
    let snapshot = library.snapshot();
    let Some(note) = snapshot.notes().iter().find(|note| note.id().to_string() == id) else {
        bail!("no note with id `{id}`");
    };
    library.select(note.id());
    let Some(note) = library.selected_note() else {
        bail!("note `{id}` is no longer loaded");
    };

    if as_json {
        let body = json!({ "note": note, "timestamp": note.normalized() });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let normalized = note.normalized();
    println!(
        "{} \u{2022} {}",
        normalized.display_date, normalized.display_time
    );
    println!("{}", display_title(&note));
    Ok(())
}

fn display_title(note: &Note) -> &str {
    if note.title().is_empty() {
        "(untitled)"
    } else {
        note.title()
    }
}
