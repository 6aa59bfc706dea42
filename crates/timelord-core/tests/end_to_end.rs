// crates/timelord-core/tests/end_to_end.rs

//! Full pipeline over a small on-disk dataset: load, index, resolve, enrich.

use chrono::{TimeZone, Utc};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use timelord_core::loader::open_index;
use timelord_core::{
    enrich_all, resolve_all, DataPaths, DispatchOrder, FlagIcons, ItemsPayload, LoadOptions,
    LookupTables, TimelordError,
};

const CITIES: &str = r#"[
  {"id":"6167865","name":"Toronto","asciiname":"Toronto","country_id":"CA","timezone":"America/Toronto","population":2600000,"latitude":"43.70011","longitude":"-79.4163"},
  {"id":"2643743","name":"London","asciiname":"London","country_id":"GB","timezone":"Europe/London","population":7556900,"latitude":"51.50853","longitude":"-0.12574"},
  {"id":"6058560","name":"London","asciiname":"London","country_id":"CA","timezone":"America/Toronto","population":346765,"latitude":"42.98339","longitude":"-81.23304"},
  {"id":"2657896","name":"Zürich","asciiname":"Zurich","country_id":"CH","timezone":"Europe/Zurich","population":341730,"latitude":"47.36667","longitude":"8.55"}
]"#;

const AIRPORTS: &str = r#"[
  {"id":1,"name":"Toronto Pearson","code":"YYZ","country_code":"CA","lat":43.6772,"long":-79.6306,"type":"large_airport"},
  {"id":2,"name":"Billy Bishop","code":"YTZ","country_code":"CA","lat":43.6275,"long":-79.3962,"type":"medium_airport"},
  {"id":3,"name":"Buttonville","code":"YKZ","country_code":"CA","lat":43.8622,"long":-79.37,"type":"small_airport"},
  {"id":4,"name":"London Intl","code":"YXU","country_code":"CA","lat":43.0356,"long":-81.1539,"type":"medium_airport"},
  {"id":5,"name":"Heathrow","code":"LHR","country_code":"GB","lat":51.4706,"long":-0.4619,"type":"large_airport"},
  {"id":6,"name":"Zurich","code":"ZRH","country_code":"CH","lat":47.4647,"long":8.5492,"type":"large_airport"}
]"#;

fn write_fixture(root: &Path) -> DataPaths {
    let paths = DataPaths::under(root);
    fs::create_dir_all(root.join("datasets")).unwrap();
    fs::create_dir_all(&paths.flags_dir).unwrap();
    fs::write(&paths.cities, CITIES).unwrap();
    fs::write(&paths.airports, AIRPORTS).unwrap();
    fs::write(
        &paths.countries,
        r#"[{"Code":"CA","Name":"Canada"},{"Code":"GB","Name":"United Kingdom"},{"Code":"CH","Name":"Switzerland"}]"#,
    )
    .unwrap();
    fs::write(&paths.phone_codes, r#"{"CA":"1","GB":"44","CH":"41"}"#).unwrap();
    fs::write(&paths.currencies, r#"{"CA":"CAD","GB":"GBP","CH":"CHF"}"#).unwrap();
    fs::write(paths.flags_dir.join("canada.png"), b"png").unwrap();
    fs::write(paths.flags_dir.join("united_kingdom.png"), b"png").unwrap();
    paths
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn toronto_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());

    let index = Arc::new(open_index(&paths, LoadOptions::default()).unwrap());
    let tables = LookupTables::load(&paths).unwrap();
    let flags = FlagIcons::new(&paths.flags_dir);
    let now = Utc.with_ymd_and_hms(2024, 7, 1, 16, 30, 0).unwrap();

    let cities = resolve_all(&["toronto"], index, DispatchOrder::Input).await;
    let results = enrich_all(&cities, &tables, now, &flags);
    assert_eq!(results.len(), 1);

    let toronto = &results[0];
    assert_eq!(toronto.title(), "Toronto — 12:30 PM EDT");
    assert_eq!(
        toronto.subtitle(),
        "Monday, July 1 | Canada | +1 | CAD | YYZ,YTZ,YXU"
    );
    assert!(toronto.icon.ends_with("canada.png"));
}

#[tokio::test]
async fn misses_are_dropped_from_the_payload() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());

    let index = Arc::new(open_index(&paths, LoadOptions::default()).unwrap());
    let tables = LookupTables::load(&paths).unwrap();
    let flags = FlagIcons::new(&paths.flags_dir);

    let cities = resolve_all(
        &["toronto", "nonexistentcityxyz"],
        index,
        DispatchOrder::Completion,
    )
    .await;
    let payload: ItemsPayload = enrich_all(&cities, &tables, Utc::now(), &flags)
        .iter()
        .map(|r| r.to_item())
        .collect();

    assert_eq!(payload.items.len(), 1);
    assert_eq!(payload.items[0].uid, "6167865");
    assert_eq!(payload.items[0].arg, "Toronto");
}

#[tokio::test]
async fn population_breaks_name_ties_and_folding_matches_accents() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());
    let index = Arc::new(open_index(&paths, LoadOptions::default()).unwrap());

    let cities = resolve_all(&["london", "ZÜRICH", "zurich"], index, DispatchOrder::Input).await;
    let ids: Vec<_> = cities.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["2643743", "2657896", "2657896"]);
}

#[tokio::test]
async fn missing_flag_and_unknown_fields_degrade() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());
    let index = Arc::new(open_index(&paths, LoadOptions::default()).unwrap());
    let tables = LookupTables::load(&paths).unwrap();
    let flags = FlagIcons::new(&paths.flags_dir);

    let cities = resolve_all(&["zurich"], index, DispatchOrder::Input).await;
    let results = enrich_all(&cities, &tables, Utc::now(), &flags);
    assert_eq!(results.len(), 1);
    assert!(results[0].icon.ends_with("_no_flag.png"));
    assert_eq!(results[0].airport_codes, vec!["ZRH".to_string()]);
}

#[test]
fn index_is_persisted_and_reused() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());

    let first = open_index(&paths, LoadOptions::default()).unwrap();
    assert!(paths.index.exists());

    // A second open must not need the dataset any more.
    fs::remove_file(&paths.cities).unwrap();
    let second = open_index(&paths, LoadOptions::default()).unwrap();
    assert_eq!(first.stats(), second.stats());

    let rebuilt = open_index(&paths, LoadOptions { rebuild: true });
    assert!(rebuilt.is_err());
}

#[test]
fn corrupt_index_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());
    fs::write(&paths.index, b"definitely not an index").unwrap();

    let err = open_index(&paths, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, TimelordError::IndexCorrupt { .. }));
}

#[test]
fn missing_dataset_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::under(dir.path());
    assert!(matches!(
        open_index(&paths, LoadOptions::default()),
        Err(TimelordError::NotFound(_))
    ));
    assert!(LookupTables::load(&paths).is_err());
}
