use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "retain-units")]
#[command(about = "Save and restore named ControlNet unit configurations between generations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding saved configurations
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Installed ControlNet extension; the store disables itself when it is missing
    #[arg(short, long, global = true)]
    pub extension_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List saved configuration names
    List,

    /// Save the units of a request file under a name
    Save {
        name: String,

        #[arg(short, long)]
        request: PathBuf,
    },

    /// Apply a saved configuration to a request file
    Load {
        name: String,

        #[arg(short, long)]
        request: PathBuf,

        /// Write the updated request here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run one generation's pre/post hooks against a request file
    Run {
        #[arg(short, long)]
        request: PathBuf,

        /// Name to save the current units under
        #[arg(short, long, default_value = "")]
        name: String,

        /// Saved configuration to load
        #[arg(short, long)]
        select: Option<String>,
    },

    /// Open the settings panel, then run one generation with its values
    Panel {
        #[arg(short, long)]
        request: PathBuf,

        /// Do not watch the store directory for changes
        #[arg(long)]
        no_watch: bool,
    },
}
