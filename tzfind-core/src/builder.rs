//! Catalog builder: reference data in, sorted timezone records out

use anyhow::{anyhow, Result};
use chrono::{Datelike, Utc};
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale::locale;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::abbrev::sample_abbreviations;
use crate::record::{derive_city, derive_name, format_utc_offset, TimezoneRecord};
use crate::reference::{ReferenceData, ZoneDescriptor};

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Calendar year sampled for abbreviations.
    pub year: i32,
    /// Worker threads for record derivation; `None` uses the global rayon pool.
    pub jobs: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            year: Utc::now().year(),
            jobs: None,
        }
    }
}

impl BuildOptions {
    pub fn for_year(year: i32) -> Self {
        Self { year, jobs: None }
    }
}

/// Derive one record per canonical, namespaced zone, sorted by display name.
///
/// Aliases and ids without a `/` (such as `UTC`) are dropped, not redirected.
pub fn build_catalog(
    reference: &(impl ReferenceData + Sync),
    opts: &BuildOptions,
) -> Result<Vec<TimezoneRecord>> {
    if matches!(opts.jobs, Some(0)) {
        return Err(anyhow!("jobs must be at least 1 when provided"));
    }
    let collator = name_collator()?;

    let zones: Vec<(&str, &ZoneDescriptor)> = reference
        .timezones()
        .into_iter()
        .filter(|(id, zone)| is_catalogued(id, zone))
        .collect();

    let run_build = || -> Vec<TimezoneRecord> {
        zones
            .par_iter()
            .map(|(id, zone)| build_record(id, zone, reference, opts.year))
            .collect()
    };

    let mut records = if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(run_build)
    } else {
        run_build()
    };
    sort_records(&mut records, &collator);

    tracing::info!(records = records.len(), year = opts.year, "built timezone catalog");
    Ok(records)
}

fn is_catalogued(id: &str, zone: &ZoneDescriptor) -> bool {
    zone.alias_of.is_none() && id.contains('/')
}

fn build_record(
    id: &str,
    zone: &ZoneDescriptor,
    reference: &impl ReferenceData,
    year: i32,
) -> TimezoneRecord {
    let country = zone
        .primary_country()
        .and_then(|code| reference.country(code));
    let country_name = country.map(|c| c.name.clone());

    TimezoneRecord {
        id: id.to_string(),
        name: derive_name(id, country_name.as_deref()),
        city: derive_city(id),
        country_name,
        country_code: country.map(|c| c.id.clone()),
        utc_offset: format_utc_offset(zone.utc_offset),
        abbreviations: sample_abbreviations(id, zone.primary_country(), year),
    }
}

/// Stable sort by display name.
fn sort_records(records: &mut [TimezoneRecord], collator: &CollatorBorrowed<'_>) {
    records.sort_by(|a, b| collator.compare(&a.name, &b.name));
}

/// `en` collation at default (tertiary) strength, used to order catalog names.
pub fn name_collator() -> Result<CollatorBorrowed<'static>> {
    Collator::try_new(locale!("en").into(), CollatorOptions::default())
        .map_err(|err| anyhow!("loading name collator: {err}"))
}
