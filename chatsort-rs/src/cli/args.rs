//! CLI argument definitions using clap.

use crate::search::FieldInputs;
use crate::store::Scope;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chatsort")]
#[command(author, version, about = "Filter, browse and re-tag summarized chat archives", long_about = None)]
pub struct Cli {
    /// Path to the archive (overrides config default)
    #[arg(long, global = true)]
    pub archive: Option<PathBuf>,

    /// Config file (defaults to ~/.config/chatsort/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a search and remember it
    Search(SearchArgs),

    /// Remember field values without searching
    Draft(DraftArgs),

    /// Restore the last filter state, re-running it if it was searched
    Resume(ResumeArgs),

    /// Show or edit a document's tags
    Tags(TagsArgs),

    /// Inspect or reset the saved filter state
    State(StateArgs),
}

// === Filter fields ===

#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Title filter: plain text, or quoted terms like '"trip" -"work"'
    #[arg(long, default_value = "")]
    pub title: String,

    /// Tag filter, matched against each tag
    #[arg(long, default_value = "")]
    pub tag: String,

    /// Summary filter
    #[arg(long, default_value = "")]
    pub summary: String,

    /// Body content filter (loads bodies lazily)
    #[arg(long, default_value = "")]
    pub content: String,

    /// Earliest creation date, inclusive (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub from: String,

    /// Latest creation date, inclusive (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub to: String,
}

impl FieldArgs {
    /// Raw values, forwarded unmodified.
    pub fn to_inputs(&self) -> FieldInputs {
        FieldInputs {
            title: self.title.clone(),
            tag: self.tag.clone(),
            summary: self.summary.clone(),
            content: self.content.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Only list documents under this folder of the archive
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Only list documents matching this glob (relative to the archive)
    #[arg(long)]
    pub glob: Option<String>,
}

impl ScopeArgs {
    pub fn to_scope(&self) -> Scope {
        Scope {
            folder: self.folder.clone(),
            glob: self.glob.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Show full summaries instead of previews
    #[arg(long)]
    pub full: bool,
}

// === Search ===

#[derive(Parser, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Parser, Debug)]
pub struct DraftArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Parser, Debug)]
pub struct ResumeArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}

// === Tags ===

#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Document path relative to the archive
    pub path: PathBuf,

    /// Replace the tags with this buffer (newlines, commas or spaces separate tags)
    #[arg(long, conflicts_with = "stdin")]
    pub set: Option<String>,

    /// Read the replacement buffer from stdin
    #[arg(long)]
    pub stdin: bool,
}

// === State ===

#[derive(Parser, Debug)]
pub struct StateArgs {
    #[command(subcommand)]
    pub command: StateCommands,
}

#[derive(Subcommand, Debug)]
pub enum StateCommands {
    /// Print the saved filter state
    Show,

    /// Forget the saved filter state
    Clear,
}
