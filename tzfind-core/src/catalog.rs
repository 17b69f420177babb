//! The generated catalog artifact and its read-only in-memory form

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::output::write_json_pretty;
use crate::query::{filter, Query};
use crate::record::TimezoneRecord;

/// Immutable, ordered record set loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<TimezoneRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<TimezoneRecord>) -> Self {
        Self { records }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let records = serde_json::from_str(raw).context("parsing catalog")?;
        Ok(Self { records })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("loading catalog {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            records = catalog.len(),
            "loaded timezone catalog"
        );
        Ok(catalog)
    }

    pub fn records(&self) -> &[TimezoneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `query`, in catalog order.
    pub fn search(&self, query: &Query) -> Vec<&TimezoneRecord> {
        filter(&self.records, query)
    }
}

/// Write records as the catalog artifact: 2-space indented JSON plus a trailing newline.
pub fn write_catalog(records: &[TimezoneRecord], mut w: impl Write) -> Result<()> {
    write_json_pretty(records, &mut w)?;
    w.write_all(b"\n")?;
    Ok(())
}

pub fn write_catalog_file(records: &[TimezoneRecord], path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    write_catalog(records, &mut buf)?;
    fs::write(path, buf).with_context(|| format!("writing catalog {}", path.display()))?;
    Ok(())
}
