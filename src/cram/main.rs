use clap::Parser;
use colored::*;
use cram::collection::Collection;
use cram::config::Preferences;
use cram::editor::{edit_content, EditorContent};
use cram::error::{CramError, Result};
use cram::model::{Draft, Flashcard, Note, Record};
use cram::store::fs::FileBackend;
use cram::view::project;
use cram::{tags, transfer};
use directories::ProjectDirs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(&cli);
    let prefs = Preferences::load(&FileBackend::new(&data_dir));

    if cli.cards {
        let collection = Collection::<Flashcard, _>::open(FileBackend::new(&data_dir));
        dispatch(collection, cli.command, prefs, &data_dir)
    } else {
        let collection = Collection::<Note, _>::open(FileBackend::new(&data_dir));
        dispatch(collection, cli.command, prefs, &data_dir)
    }
}

fn resolve_data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.dir {
        return dir.clone();
    }
    if let Ok(dir) = std::env::var("CRAM_HOME") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    let proj_dirs = ProjectDirs::from("com", "cram", "cram").expect("Could not determine data dir");
    proj_dirs.data_dir().to_path_buf()
}

fn dispatch<R: Record>(
    mut collection: Collection<R, FileBackend>,
    command: Option<Commands>,
    prefs: Preferences,
    data_dir: &Path,
) -> Result<()> {
    match command {
        Some(Commands::Add {
            primary,
            secondary,
            tags,
            pin,
            no_editor,
        }) => handle_add(&mut collection, primary, secondary, tags, pin, no_editor),
        Some(Commands::List { search }) => {
            handle_list(&collection, search.as_deref().unwrap_or(""), prefs);
            Ok(())
        }
        Some(Commands::Edit {
            reference,
            tags,
            clear_tags,
            no_editor,
        }) => handle_edit(&mut collection, &reference, tags, clear_tags, no_editor),
        Some(Commands::Rm { reference, yes }) => handle_rm(&mut collection, &reference, yes),
        Some(Commands::Pin { reference }) => handle_pin(&mut collection, &reference),
        Some(Commands::Export { path }) => handle_export(&collection, path),
        Some(Commands::Import { path }) => handle_import(&mut collection, &path),
        Some(Commands::Config { key, value }) => handle_config(data_dir, key, value, prefs),
        None => {
            handle_list(&collection, "", prefs);
            Ok(())
        }
    }
}

fn handle_add<R: Record>(
    collection: &mut Collection<R, FileBackend>,
    primary: Option<String>,
    secondary: Option<String>,
    tag_args: Vec<String>,
    pin: bool,
    no_editor: bool,
) -> Result<()> {
    let (primary, secondary) = if primary.is_none() && !no_editor {
        let edited = edit_content(&EditorContent::new(String::new(), String::new()))?;
        (edited.primary, edited.secondary)
    } else {
        (primary.unwrap_or_default(), secondary.unwrap_or_default())
    };

    let mut draft = Draft {
        primary,
        secondary,
        tags: Vec::new(),
        pinned: pin,
    };
    for tag in &tag_args {
        tags::add_tag(&mut draft.tags, tag);
    }

    let title = draft.primary.clone();
    collection.create(draft)?;
    println!("{}", format!("Added {}: {}", R::KIND, title).green());
    Ok(())
}

fn handle_list<R: Record>(collection: &Collection<R, FileBackend>, term: &str, prefs: Preferences) {
    let projected = project(collection.records(), term);
    print_records(
        &projected,
        collection.len(),
        collection.pinned_count(),
        prefs.dark_mode,
    );
}

fn handle_edit<R: Record>(
    collection: &mut Collection<R, FileBackend>,
    reference: &str,
    tag_args: Vec<String>,
    clear_tags: bool,
    no_editor: bool,
) -> Result<()> {
    let Some(id) = resolve_reference(collection, reference) else {
        warn_missing::<R>(reference);
        return Ok(());
    };

    collection.open_draft(Some(&id));
    if let Some(session) = collection.draft_mut() {
        if clear_tags {
            session.draft.tags.clear();
        }
        for tag in &tag_args {
            tags::add_tag(&mut session.draft.tags, tag);
        }
        if !no_editor {
            let initial =
                EditorContent::new(session.draft.primary.clone(), session.draft.secondary.clone());
            let edited = edit_content(&initial)?;
            session.draft.primary = edited.primary;
            session.draft.secondary = edited.secondary;
        }
    }

    match collection.save_draft()? {
        Some(id) => {
            let title = collection
                .get(&id)
                .map(|r| r.primary().to_string())
                .unwrap_or_default();
            println!("{}", format!("Updated {}: {}", R::KIND, title).green());
        }
        None => warn_missing::<R>(reference),
    }
    Ok(())
}

fn handle_rm<R: Record>(
    collection: &mut Collection<R, FileBackend>,
    reference: &str,
    yes: bool,
) -> Result<()> {
    let Some(id) = resolve_reference(collection, reference) else {
        warn_missing::<R>(reference);
        return Ok(());
    };

    if !yes && !confirm(&format!("Delete this {}?", R::KIND))? {
        println!("Cancelled.");
        return Ok(());
    }

    if collection.delete(&id)? {
        println!("{}", format!("Deleted {} {}", R::KIND, reference).green());
    } else {
        warn_missing::<R>(reference);
    }
    Ok(())
}

fn handle_pin<R: Record>(
    collection: &mut Collection<R, FileBackend>,
    reference: &str,
) -> Result<()> {
    let Some(id) = resolve_reference(collection, reference) else {
        warn_missing::<R>(reference);
        return Ok(());
    };

    match collection.toggle_pin(&id)? {
        Some(true) => println!("{}", format!("Pinned {} {}", R::KIND, reference).green()),
        Some(false) => println!("{}", format!("Unpinned {} {}", R::KIND, reference).green()),
        None => warn_missing::<R>(reference),
    }
    Ok(())
}

fn handle_export<R: Record>(
    collection: &Collection<R, FileBackend>,
    path: Option<PathBuf>,
) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(transfer::default_export_filename::<R>()));
    transfer::export_to_file(collection.records(), &path)?;
    println!(
        "{}",
        format!(
            "Exported {} {}s to {}",
            collection.len(),
            R::KIND,
            path.display()
        )
        .green()
    );
    Ok(())
}

fn handle_import<R: Record>(
    collection: &mut Collection<R, FileBackend>,
    path: &Path,
) -> Result<()> {
    let records = transfer::import_from_file::<R>(path)?;
    let count = records.len();
    collection.replace_all(records)?;
    println!("{}", format!("Imported {} {}s.", count, R::KIND).green());
    Ok(())
}

fn handle_config(
    data_dir: &Path,
    key: Option<String>,
    value: Option<String>,
    mut prefs: Preferences,
) -> Result<()> {
    match (key.as_deref(), value.as_deref()) {
        (None, _) | (Some("dark-mode"), None) => {
            println!("dark-mode = {}", if prefs.dark_mode { "on" } else { "off" });
        }
        (Some("dark-mode"), Some(value)) => {
            prefs.dark_mode = match value {
                "on" | "true" => true,
                "off" | "false" => false,
                other => {
                    println!("Invalid value for dark-mode: {}", other);
                    return Ok(());
                }
            };
            prefs.save(&mut FileBackend::new(data_dir))?;
            println!(
                "{}",
                format!("dark-mode set to {}", if prefs.dark_mode { "on" } else { "off" }).green()
            );
        }
        (Some(other), _) => println!("Unknown config key: {}", other),
    }
    Ok(())
}

/// Maps a user-supplied reference to a record id. Numbers are 1-based
/// indexes into the unfiltered listing (what `cram list` shows); anything
/// else is tried as a full id.
fn resolve_reference<R: Record>(
    collection: &Collection<R, FileBackend>,
    reference: &str,
) -> Option<String> {
    if let Ok(n) = reference.parse::<usize>() {
        let projected = project(collection.records(), "");
        return match n {
            0 => None,
            n => projected.get(n - 1).map(|r| r.id().to_string()),
        };
    }
    collection.get(reference).map(|r| r.id().to_string())
}

fn warn_missing<R: Record>(reference: &str) {
    println!(
        "{}",
        format!("No {} at {}", R::KIND, reference).yellow()
    );
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().map_err(CramError::Io)?;

    let mut line = String::new();
    io::stdin().read_line(&mut line).map_err(CramError::Io)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

const LINE_WIDTH: usize = 100;
const PIN_MARKER: &str = "⚲";

fn print_records<R: Record>(records: &[R], total: usize, pinned: usize, dark: bool) {
    if records.is_empty() {
        println!("No {}s found.", R::KIND);
    }

    for (i, record) in records.iter().enumerate() {
        let idx_str = format!("{}. ", i + 1);
        let marker = if record.pinned() {
            format!("{} ", PIN_MARKER)
        } else {
            "  ".to_string()
        };

        let preview: String = record
            .secondary()
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let text = if preview.is_empty() {
            record.primary().to_string()
        } else {
            format!("{} {}", record.primary(), preview)
        };

        let chips = record
            .tags()
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");

        let fixed = marker.width() + idx_str.width() + chips.width() + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let text = truncate_to_width(&text, available);
        let padding = available.saturating_sub(text.width());

        let idx_colored = if record.pinned() {
            if dark {
                idx_str.bright_yellow()
            } else {
                idx_str.yellow()
            }
        } else {
            idx_str.normal()
        };

        println!(
            "{}{}{}{}  {}",
            marker,
            idx_colored,
            text,
            " ".repeat(padding),
            chips.dimmed()
        );
    }

    println!();
    println!(
        "{}",
        format!("Total {}s: {} | Pinned: {}", R::KIND, total, pinned).dimmed()
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
