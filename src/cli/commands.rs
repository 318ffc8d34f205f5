use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "habitual")]
#[command(version, about = "Track recurring habits, completions and tags")]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "HABITUAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides the configuration file)
    #[arg(long, global = true, env = "HABITUAL_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:4000
        #[arg(long)]
        bind: Option<String>,
    },

    /// Manage habits, completions and their tags
    Habit(HabitCommand),

    /// Manage tags
    Tag(TagCommand),
}

#[derive(Args, Debug)]
pub struct HabitCommand {
    #[command(subcommand)]
    pub action: HabitAction,
}

#[derive(Subcommand, Debug)]
pub enum HabitAction {
    /// Create a habit
    Add {
        name: String,

        #[arg(long, short = 'd', default_value = "")]
        description: String,

        /// Cadence label (daily, weekly, ...)
        #[arg(long, short = 'f', default_value = "daily")]
        frequency: String,

        /// Completions expected per period
        #[arg(long, short = 't', default_value_t = 1)]
        target: u32,

        /// Create the habit as inactive
        #[arg(long)]
        inactive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List habits, optionally only those carrying a tag
    List {
        /// Tag ID (or unique prefix) to filter by
        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show a habit
    Get {
        /// Habit ID or unique prefix
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Change some fields of a habit
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        frequency: Option<String>,

        #[arg(long)]
        target: Option<u32>,

        /// true or false
        #[arg(long)]
        active: Option<bool>,

        #[arg(long)]
        json: bool,
    },

    /// Delete a habit with its entries and tag links
    Delete { id: String },

    /// Log a completion regardless of whether the habit is active
    Log {
        id: String,

        #[arg(long, short = 'n')]
        note: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Complete an active habit
    Complete {
        id: String,

        #[arg(long, short = 'n')]
        note: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List completion entries of a habit
    Entries {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Attach a tag to a habit
    Tag { id: String, tag: String },

    /// Detach a tag from a habit
    Untag { id: String, tag: String },

    /// List the tags of a habit
    Tags {
        id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct TagCommand {
    #[command(subcommand)]
    pub action: TagAction,
}

#[derive(Subcommand, Debug)]
pub enum TagAction {
    /// Create a tag
    Add {
        name: String,

        /// Color, e.g. "#22c55e"
        #[arg(long, short = 'c', default_value = "")]
        color: String,

        #[arg(long)]
        json: bool,
    },

    /// List tags
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show a tag
    Get {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Rename or recolor a tag
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Delete a tag and detach it from every habit
    Delete { id: String },

    /// List habits carrying a tag
    Habits {
        id: String,

        #[arg(long)]
        json: bool,
    },
}
