//! Command-line interface definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the grocery store.
#[derive(Parser, Debug)]
#[command(
    name = "grocery",
    about = "Install, uninstall and paste personal config groceries",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the grocery store root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link or copy every collection into its destination folders
    Install(InstallOpts),
    /// Remove what install placed
    Uninstall(UninstallOpts),
    /// Copy one grocery into the current directory or a target path
    Paste(PasteOpts),
    /// Print the store's file tree as JSON
    Catalog(CatalogOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name, also used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Uninstall(_) => "uninstall",
            Self::Paste(_) => "paste",
            Self::Catalog(_) => "catalog",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Replace existing destinations (requires elevated privileges)
    #[arg(short, long, visible_alias = "override")]
    pub force: bool,
}

/// Options for the `uninstall` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UninstallOpts {}

/// Options for the `paste` subcommand.
///
/// Each value is accepted positionally or keyed; the keyed form wins.
#[derive(Parser, Debug, Clone)]
pub struct PasteOpts {
    /// Grocery name, e.g. ".editorconfig" or "nodejs/.editorconfig"
    #[arg(value_name = "SOURCE")]
    pub source_pos: Option<String>,

    /// Destination file or directory
    #[arg(value_name = "TARGET")]
    pub target_pos: Option<PathBuf>,

    /// Grocery name (overrides the positional SOURCE)
    #[arg(short, long = "source", value_name = "SOURCE")]
    pub source: Option<String>,

    /// Destination (overrides the positional TARGET)
    #[arg(short, long = "target", value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Replace an existing destination file
    #[arg(short, long, visible_alias = "override")]
    pub force: bool,
}

impl PasteOpts {
    /// The effective grocery name.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref().or(self.source_pos.as_deref())
    }

    /// The effective destination.
    #[must_use]
    pub fn target(&self) -> Option<&std::path::Path> {
        self.target.as_deref().or(self.target_pos.as_deref())
    }
}

/// Options for the `catalog` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CatalogOpts {
    /// Write the catalog to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
