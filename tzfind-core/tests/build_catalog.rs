use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;

use regex::Regex;
use tzfind_core::builder::{build_catalog, name_collator, BuildOptions};
use tzfind_core::catalog::write_catalog;
use tzfind_core::record::TimezoneRecord;
use tzfind_core::reference::{ReferenceDb, ZoneDescriptor};

fn fixture() -> ReferenceDb {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("reference.json");
    ReferenceDb::load(&path).expect("load fixture")
}

fn build_2024() -> Vec<TimezoneRecord> {
    build_catalog(&fixture(), &BuildOptions::for_year(2024)).expect("build")
}

fn find<'a>(records: &'a [TimezoneRecord], id: &str) -> &'a TimezoneRecord {
    records
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("{id} missing from catalog"))
}

#[test]
fn aliases_and_bare_ids_are_excluded() {
    let records = build_2024();
    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();

    assert_eq!(records.len(), 11);
    assert!(!ids.contains("UTC"));
    assert!(!ids.contains("US/Eastern"));
    assert!(!ids.contains("Europe/Monaco"));
    assert!(ids.contains("Europe/Paris"));
}

#[test]
fn ids_are_unique() {
    let records = build_2024();
    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), records.len());
}

#[test]
fn records_are_sorted_by_name() {
    let records = build_2024();
    let collator = name_collator().expect("collator");
    for pair in records.windows(2) {
        assert_ne!(
            collator.compare(&pair[0].name, &pair[1].name),
            Ordering::Greater,
            "{} sorted after {}",
            pair[0].name,
            pair[1].name
        );
    }

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.first().copied(), Some("America / Argentina / Buenos Aires (Argentina)"));
    assert_eq!(names.last().copied(), Some("Pacific / Chatham (New Zealand)"));
}

#[test]
fn offsets_use_signed_two_digit_format() {
    let pattern = Regex::new(r"^[+-]\d{2}:\d{2}$").unwrap();
    for record in build_2024() {
        assert!(pattern.is_match(&record.utc_offset), "{}", record.utc_offset);
    }
}

#[test]
fn new_york_record_is_fully_enriched() {
    let records = build_2024();
    let expected = TimezoneRecord {
        id: "America/New_York".into(),
        name: "America / New York (United States)".into(),
        city: Some("New York".into()),
        country_name: Some("United States".into()),
        country_code: Some("US".into()),
        utc_offset: "-05:00".into(),
        abbreviations: vec!["EDT".into(), "EST".into()],
    };

    assert_eq!(find(&records, "America/New_York"), &expected);
}

#[test]
fn primary_country_is_first_listed() {
    let records = build_2024();
    let paris = find(&records, "Europe/Paris");

    assert_eq!(paris.country_code.as_deref(), Some("FR"));
    assert_eq!(paris.name, "Europe / Paris (France)");
    assert_eq!(paris.abbreviations, vec!["UTC+1", "UTC+2"]);
}

#[test]
fn abbreviations_use_the_primary_country_locale() {
    let records = build_2024();

    assert_eq!(find(&records, "Europe/Berlin").abbreviations, vec!["MESZ", "MEZ"]);
    assert_eq!(find(&records, "America/New_York").abbreviations, vec!["EDT", "EST"]);
}

#[test]
fn unresolved_country_leaves_both_fields_absent() {
    let records = build_2024();
    let troll = find(&records, "Antarctica/Troll");

    assert_eq!(troll.country_code, None);
    assert_eq!(troll.country_name, None);
    assert_eq!(troll.name, "Antarctica / Troll");
    assert_eq!(troll.city.as_deref(), Some("Troll"));
}

#[test]
fn etc_zones_have_no_city_or_country() {
    let records = build_2024();
    let etc = find(&records, "Etc/GMT-3");

    assert_eq!(etc.city, None);
    assert_eq!(etc.country_code, None);
    assert_eq!(etc.utc_offset, "+03:00");
    assert_eq!(etc.abbreviations, vec!["GMT+3"]);
}

#[test]
fn country_already_in_name_is_not_repeated() {
    let records = build_2024();
    assert_eq!(find(&records, "Asia/Singapore").name, "Asia / Singapore");
}

#[test]
fn fractional_hour_offsets_keep_minutes() {
    let records = build_2024();
    assert_eq!(find(&records, "Asia/Kathmandu").utc_offset, "+05:45");
    assert_eq!(find(&records, "America/St_Johns").utc_offset, "-03:30");
    assert_eq!(find(&records, "Pacific/Chatham").utc_offset, "+12:45");
}

#[test]
fn repeated_builds_are_byte_identical() {
    let render = |records: &[TimezoneRecord]| {
        let mut buf = Vec::new();
        write_catalog(records, &mut buf).expect("write");
        buf
    };

    let first = render(&build_2024());
    let second = render(&build_2024());
    assert_eq!(first, second);
}

#[test]
fn dedicated_pool_matches_global_pool() {
    let reference = fixture();
    let opts = BuildOptions {
        year: 2024,
        jobs: Some(2),
    };

    let pooled = build_catalog(&reference, &opts).expect("build");
    assert_eq!(pooled, build_2024());
}

#[test]
fn zero_jobs_is_rejected() {
    let opts = BuildOptions {
        year: 2024,
        jobs: Some(0),
    };
    let err = build_catalog(&fixture(), &opts).unwrap_err();
    assert!(err.to_string().contains("jobs must be at least 1"));
}

#[test]
fn zone_missing_from_tz_database_gets_empty_abbreviations() {
    let reference = ReferenceDb::new().with_zone(
        "Mars/Olympus_Mons",
        ZoneDescriptor {
            utc_offset: -37,
            ..ZoneDescriptor::default()
        },
    );

    let records = build_catalog(&reference, &BuildOptions::for_year(2024)).expect("build");
    assert_eq!(records.len(), 1);
    assert!(records[0].abbreviations.is_empty());
    assert_eq!(records[0].utc_offset, "-00:37");
    assert_eq!(records[0].city.as_deref(), Some("Olympus Mons"));
}
