use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "casemark")]
#[command(about = "Bookmark scanned case files from a few page anchors, with MCP server support")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp {
        /// TOML file overriding label naming and ordering
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the category every page ends up with
    Labels {
        #[command(flatten)]
        source: PageSource,

        #[command(flatten)]
        anchors: AnchorArgs,
    },

    /// Show page coverage per category
    Summary {
        #[command(flatten)]
        source: PageSource,

        #[command(flatten)]
        anchors: AnchorArgs,
    },

    /// Show the bookmarks that would be written, without touching any file
    Outline {
        #[command(flatten)]
        source: PageSource,

        #[command(flatten)]
        anchors: AnchorArgs,
    },

    /// Write bookmarks into a copy of a PDF, replacing any it already has
    Apply {
        /// PDF file to bookmark
        path: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        anchors: AnchorArgs,
    },

    /// Print the bookmarks a PDF already has
    Toc {
        /// PDF file to inspect
        path: PathBuf,
    },
}

/// Where the page count comes from.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct PageSource {
    /// PDF file supplying the page count
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// Page count, when there is no PDF at hand
    #[arg(short = 'n', long)]
    pub pages: Option<u32>,
}

#[derive(Args)]
pub struct AnchorArgs {
    /// Anchor as PAGE=CATEGORY[:VALUE], e.g. "1=index", "3=oa", "5=annexure:2", "9=custom:Reply"
    #[arg(short = 'a', long = "anchor", value_name = "ANCHOR")]
    pub anchors: Vec<String>,

    /// JSON file mapping page numbers to assignments
    #[arg(short = 'f', long, value_name = "FILE")]
    pub anchors_file: Option<PathBuf>,

    /// TOML file overriding label naming and ordering
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
