// crates/timelord-core/src/loader/builder.rs

//! Load-or-build cycle of the persisted city index.
//!
//! File layout: a 6-byte raw header (`TLIX`, format version, compression
//! tag) followed by the bincode-encoded [`CityIndex`], gzip-compressed when
//! the tag says so. The reader honours the tag, so an index written with
//! either compression mode can always be opened.

use super::load_cities;
use crate::error::{Result, TimelordError};
use crate::index::CityIndex;
use bincode::Options;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const INDEX_MAGIC: &[u8; 4] = b"TLIX";
pub const INDEX_FORMAT_VERSION: u8 = 1;
/// Refuse to decode payloads claiming more than this many bytes.
const DECODE_LIMIT: u64 = 1 << 30;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    /// Gzip when the `compact` feature is on.
    pub fn preferred() -> Self {
        if cfg!(feature = "compact") {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }

    fn tag(self) -> u8 {
        match self {
            CompressionMode::None => 0,
            CompressionMode::Gzip => 1,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(CompressionMode::None),
            1 => Some(CompressionMode::Gzip),
            _ => None,
        }
    }
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(DECODE_LIMIT)
}

// -----------------------------------------------------------------------------
// LOAD OR BUILD
// -----------------------------------------------------------------------------

/// Opens the index at `index_path`, building it from `cities_path` if absent.
///
/// An existing index is reused as-is; it is not compared against the
/// dataset. With `rebuild` the dataset is always re-read. Failing to write
/// the freshly built index is logged and otherwise ignored.
pub fn load_or_build(index_path: &Path, cities_path: &Path, rebuild: bool) -> Result<CityIndex> {
    if !rebuild && index_path.exists() {
        let index = read_index(index_path)?;
        tracing::info!(path = %index_path.display(), cities = index.len(), "opened city index");
        return Ok(index);
    }

    tracing::info!(
        source = %cities_path.display(),
        target = %index_path.display(),
        "building city index"
    );
    let records = load_cities(cities_path)?;
    let index = CityIndex::build(records)?;

    if let Err(e) = write_index(index_path, &index, CompressionMode::preferred()) {
        tracing::warn!(path = %index_path.display(), error = %e, "could not persist city index");
    }

    Ok(index)
}

/// Writes the index through a temporary file and renames it into place.
pub fn write_index(path: &Path, index: &CityIndex, compression: CompressionMode) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        writer.write_all(INDEX_MAGIC)?;
        writer.write_all(&[INDEX_FORMAT_VERSION, compression.tag()])?;

        match compression {
            CompressionMode::Gzip => {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                bincode_options().serialize_into(&mut encoder, index)?;
                encoder.finish()?.flush()?;
            }
            CompressionMode::None => {
                bincode_options().serialize_into(&mut writer, index)?;
                writer.flush()?;
            }
        }
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a persisted index. Anything unreadable past `File::open` is
/// reported as [`TimelordError::IndexCorrupt`].
pub fn read_index(path: &Path) -> Result<CityIndex> {
    let corrupt = |reason: String| TimelordError::IndexCorrupt {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = BufReader::new(File::open(path)?);

    let mut header = [0u8; 6];
    reader
        .read_exact(&mut header)
        .map_err(|e| corrupt(format!("truncated header: {e}")))?;
    if &header[..4] != INDEX_MAGIC {
        return Err(corrupt("not a timelord index".into()));
    }
    if header[4] != INDEX_FORMAT_VERSION {
        return Err(corrupt(format!(
            "format version {} (expected {INDEX_FORMAT_VERSION})",
            header[4]
        )));
    }
    let compression = CompressionMode::from_tag(header[5])
        .ok_or_else(|| corrupt(format!("unknown compression tag {}", header[5])))?;

    let decoded: std::result::Result<CityIndex, bincode::Error> = match compression {
        CompressionMode::Gzip => bincode_options().deserialize_from(GzDecoder::new(reader)),
        CompressionMode::None => bincode_options().deserialize_from(reader),
    };
    let index = decoded.map_err(|e| corrupt(e.to_string()))?;
    index.verify().map_err(corrupt)?;

    Ok(index)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}
