use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rptree")]
#[command(
    version,
    about = "Print a directory tree with file sizes, suffix filters and search highlighting"
)]
pub struct Cli {
    /// Root directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Max depth (0 = list nothing, 1 = only the root's children)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only show entries whose name ends with this suffix, e.g. ".txt"
    #[arg(long)]
    pub suffix: Option<String>,

    /// Highlight entries whose name contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Show dotfiles
    #[arg(long, action = ArgAction::SetTrue)]
    pub hidden: bool,

    /// Suffix of source files to highlight
    #[arg(long, default_value = ".py")]
    pub source_suffix: String,

    /// Descend into symlinked directories
    #[arg(long, action = ArgAction::SetTrue)]
    pub follow_symlinks: bool,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    pub format: Format,

    /// Skip the "Directory Tree Structure:" banner
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_banner: bool,

    /// Never draw the progress bar
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_progress: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum Format {
    Plain,
    Json,
}
