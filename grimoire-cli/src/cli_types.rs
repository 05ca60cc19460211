//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "grimoire")]
#[command(about = "Import and browse a French spell and monster catalog", long_about = None)]
pub(crate) struct Cli {
    /// Database file (overrides GRIMOIRE_DB and settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import a spell, class/spell-slot, or monster CSV export
    Import {
        /// CSV file to import
        file: PathBuf,

        /// Guess aidedd.org image URLs for monsters without one
        #[arg(long)]
        infer_images: bool,

        /// Print the result object as JSON
        #[arg(long)]
        json: bool,
    },

    /// List spells, optionally filtered
    Spells {
        /// Class name (repeatable, any spelling: "Rôdeur", "rodeur", ...)
        #[arg(short, long = "class")]
        classes: Vec<String>,

        /// Spell level 0-9 (repeatable)
        #[arg(short, long = "level", value_parser = clap::value_parser!(i64).range(0..=9))]
        levels: Vec<i64>,

        /// Text to look for in the name or description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one spell
    Spell {
        /// Spell id
        id: i64,
    },

    /// List monsters, optionally filtered
    Monsters {
        /// Monster type (repeatable)
        #[arg(short, long = "type")]
        types: Vec<String>,

        /// Text to look for in the name, type, or description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one monster's stat block
    Monster {
        /// Monster id
        id: i64,
    },

    /// List classes and their subclasses
    Classes,

    /// Show the spell slot progression of a subclass
    Slots {
        /// Class name
        class: String,

        /// Subclass name or slug
        subclass: String,

        /// Only this character level
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=20))]
        level: Option<i64>,
    },

    /// Toggle a monster in a user's favorites
    Favorite {
        user_id: i64,
        monster_id: i64,
    },

    /// Toggle a spell in a character's prepared list
    Prepare {
        character_id: i64,
        spell_id: i64,
    },

    /// Show database statistics and recent imports
    Stats,

    /// Delete the database file
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file path
    Path,
    /// Show resolved settings and where each value comes from
    Show,
}
