//! Reference timezone/country data consumed by the catalog builder

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// What the reference database knows about one zone id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDescriptor {
    /// Canonical zone this id points at, when the id is only an alias.
    #[serde(default)]
    pub alias_of: Option<String>,
    /// ISO country codes using this zone, primary country first.
    #[serde(default)]
    pub countries: Vec<String>,
    /// Standard offset from UTC in minutes.
    #[serde(default)]
    pub utc_offset: i32,
}

impl ZoneDescriptor {
    pub fn primary_country(&self) -> Option<&str> {
        self.countries.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryDescriptor {
    pub id: String,
    pub name: String,
}

/// Source of zone and country metadata for a catalog build.
pub trait ReferenceData {
    /// All known zones, ascending by id.
    fn timezones(&self) -> Vec<(&str, &ZoneDescriptor)>;

    fn country(&self, code: &str) -> Option<&CountryDescriptor>;
}

/// In-memory reference database read from a countries-and-timezones style JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceDb {
    #[serde(default)]
    countries: BTreeMap<String, CountryDescriptor>,
    #[serde(default)]
    timezones: BTreeMap<String, ZoneDescriptor>,
}

impl ReferenceDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, code: &str, name: &str) -> Self {
        self.countries.insert(
            code.to_string(),
            CountryDescriptor {
                id: code.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_zone(mut self, id: &str, zone: ZoneDescriptor) -> Self {
        self.timezones.insert(id.to_string(), zone);
        self
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).context("parsing reference data")
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parsing reference data")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)
            .with_context(|| format!("opening reference data {}", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("loading reference data {}", path.display()))
    }

    pub fn zone_count(&self) -> usize {
        self.timezones.len()
    }
}

impl ReferenceData for ReferenceDb {
    fn timezones(&self) -> Vec<(&str, &ZoneDescriptor)> {
        self.timezones
            .iter()
            .map(|(id, zone)| (id.as_str(), zone))
            .collect()
    }

    fn country(&self, code: &str) -> Option<&CountryDescriptor> {
        self.countries.get(code)
    }
}
