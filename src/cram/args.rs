use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cram")]
#[command(about = "A pocket note and flashcard manager for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Operate on the flashcard deck instead of notes
    #[arg(short, long, global = true)]
    pub cards: bool,

    /// Override the data directory (also: $CRAM_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note or flashcard
    #[command(alias = "a")]
    Add {
        /// Title (notes) or question (cards); opens the editor if omitted
        #[arg(required = false)]
        primary: Option<String>,

        /// Content (notes) or answer (cards)
        #[arg(required = false)]
        secondary: Option<String>,

        /// Attach a tag (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Pin on creation
        #[arg(short, long)]
        pin: bool,

        /// Never open the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// List records, pinned first
    #[command(alias = "ls")]
    List {
        /// Filter by a search term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Edit a record in $EDITOR
    #[command(alias = "e")]
    Edit {
        /// Index from `cram list`, or a full id
        reference: String,

        /// Add a tag (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Drop all existing tags first
        #[arg(long)]
        clear_tags: bool,

        /// Keep the text as-is, only apply tag changes
        #[arg(long)]
        no_editor: bool,
    },

    /// Delete a record
    #[command(alias = "delete")]
    Rm {
        /// Index from `cram list`, or a full id
        reference: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Pin or unpin a record
    Pin {
        /// Index from `cram list`, or a full id
        reference: String,
    },

    /// Write the whole collection to a JSON file
    Export {
        /// Output path (default: notes_export.json / flashcards_export.json)
        path: Option<PathBuf>,
    },

    /// Replace the whole collection from a JSON file
    Import {
        /// A .json file holding a top-level array of records
        path: PathBuf,
    },

    /// Show or change preferences
    Config {
        /// Preference key (dark-mode)
        key: Option<String>,

        /// New value (on/off)
        value: Option<String>,
    },
}
