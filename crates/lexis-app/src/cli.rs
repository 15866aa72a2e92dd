use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lexis_core::SearchType;

/// Multi-dictionary term lookup
#[derive(Parser, Debug)]
#[command(name = "lexis", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a group of dictionaries and print the JSON result
    Search(SearchArgs),
    /// List dictionaries by language with their settings
    Dictionaries,
    /// List user groups followed by the per-language defaults
    Groups,
    /// Create or replace a user group
    SaveGroup {
        name: String,
        /// `Language:Dictionary`, `google-images` or `forvo`, in search order
        #[arg(required = true)]
        members: Vec<String>,
    },
    DeleteGroup {
        name: String,
    },
    /// Create a dictionary and bulk-insert rows from a JSON array
    Load {
        language: String,
        dictionary: String,
        rows: PathBuf,
    },
    /// Delete a dictionary, its rows and its group memberships
    Remove {
        dictionary: String,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct SearchArgs {
    pub term: String,

    /// Group to search; defaults to LEXIS_DEFAULT_GROUP
    #[arg(short, long)]
    pub group: Option<String>,

    /// exact, anywhere, forward, backward, pronunciation, definition or example
    #[arg(short = 't', long = "type")]
    pub search_type: Option<SearchType>,

    /// Match the term as written, without conjugation candidates
    #[arg(long)]
    pub no_deinflect: bool,

    /// Rows per dictionary
    #[arg(long)]
    pub dict_limit: Option<usize>,

    /// Rows across all dictionaries
    #[arg(short, long)]
    pub limit: Option<usize>,
}
