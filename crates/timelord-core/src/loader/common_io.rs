// crates/timelord-core/src/loader/common_io.rs
use crate::error::{Result, TimelordError};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Opens a dataset file, transparently gunzipping `*.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        TimelordError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Reads and parses a whole JSON dataset.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = open_stream(path)?;
    serde_json::from_reader(reader).map_err(|e| {
        TimelordError::InvalidData(format!("{} is not valid: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn reads_plain_and_gzipped_json() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("phone.json");
        std::fs::write(&plain, r#"{"CA":"1"}"#).unwrap();

        let gz = dir.path().join("phone.json.gz");
        let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        enc.write_all(br#"{"GB":"44"}"#).unwrap();
        enc.finish().unwrap();

        let a: HashMap<String, String> = read_json(&plain).unwrap();
        let b: HashMap<String, String> = read_json(&gz).unwrap();
        assert_eq!(a["CA"], "1");
        assert_eq!(b["GB"], "44");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let res: Result<HashMap<String, String>> = read_json(&dir.path().join("nope.json"));
        assert!(matches!(res, Err(TimelordError::NotFound(_))));
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let res: Result<HashMap<String, String>> = read_json(&path);
        assert!(matches!(res, Err(TimelordError::InvalidData(_))));
    }
}
