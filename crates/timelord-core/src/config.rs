// crates/timelord-core/src/config.rs
use std::path::{Path, PathBuf};

/// Default location of the persisted index, relative to the data root.
pub const DEFAULT_INDEX_FILE: &str = "cities.idx";
/// Directory holding the JSON datasets, relative to the data root.
pub const DATASETS_DIR: &str = "datasets";
/// Directory holding `<country>.png` flag icons, relative to the data root.
pub const FLAGS_DIR: &str = "flags";

/// Where every input and the persisted index live.
///
/// [`DataPaths::under`] gives the standard layout:
///
/// ```text
/// <root>/cities.idx
/// <root>/datasets/{cities,countries,airports,phone,currency}.json
/// <root>/flags/<country>.png
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub cities: PathBuf,
    pub countries: PathBuf,
    pub airports: PathBuf,
    pub phone_codes: PathBuf,
    pub currencies: PathBuf,
    pub index: PathBuf,
    pub flags_dir: PathBuf,
}

impl DataPaths {
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let datasets = root.join(DATASETS_DIR);
        Self {
            cities: datasets.join("cities.json"),
            countries: datasets.join("countries.json"),
            airports: datasets.join("airports.json"),
            phone_codes: datasets.join("phone.json"),
            currencies: datasets.join("currency.json"),
            index: root.join(DEFAULT_INDEX_FILE),
            flags_dir: root.join(FLAGS_DIR),
        }
    }

    pub fn with_index(mut self, path: impl Into<PathBuf>) -> Self {
        self.index = path.into();
        self
    }

    pub fn with_flags_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.flags_dir = path.into();
        self
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::under(".")
    }
}
