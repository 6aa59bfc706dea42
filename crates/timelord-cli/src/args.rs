use clap::Parser;
use std::path::PathBuf;
use timelord_core::{DataPaths, DispatchOrder};

/// CLI arguments for timelord
#[derive(Debug, Parser)]
#[command(
    name = "timelord",
    version,
    about = "Local time, country details and nearest airports for a list of cities"
)]
pub struct CliArgs {
    /// Cities to look up, separated by commas (e.g. `toronto, london`)
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Directory holding `datasets/`, `flags/` and the index file
    #[arg(short = 'd', long = "data-dir", env = "TIMELORD_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Path of the persisted city index (default: <data-dir>/cities.idx)
    #[arg(long = "index", env = "TIMELORD_INDEX")]
    pub index: Option<PathBuf>,

    /// Directory of `<country>.png` flag icons (default: <data-dir>/flags)
    #[arg(long = "flags-dir", env = "TIMELORD_FLAGS_DIR")]
    pub flags_dir: Option<PathBuf>,

    /// Print results in query order instead of completion order
    #[arg(long = "stable-order")]
    pub stable_order: bool,

    /// Rebuild the index from `cities.json` even if one exists
    #[arg(long = "rebuild-index")]
    pub rebuild_index: bool,

    /// Log at debug level unless TIMELORD_LOG says otherwise
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// The query terms: positional words joined by spaces, split on `,`,
    /// trimmed, blanks dropped.
    pub fn terms(&self) -> Vec<String> {
        split_terms(&self.query.join(" "))
    }

    pub fn data_paths(&self) -> DataPaths {
        let mut paths = DataPaths::under(&self.data_dir);
        if let Some(index) = &self.index {
            paths = paths.with_index(index);
        }
        if let Some(flags) = &self.flags_dir {
            paths = paths.with_flags_dir(flags);
        }
        paths
    }

    pub fn order(&self) -> DispatchOrder {
        if self.stable_order {
            DispatchOrder::Input
        } else {
            DispatchOrder::Completion
        }
    }
}

pub fn split_terms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
