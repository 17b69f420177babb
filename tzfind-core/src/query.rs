//! Query parsing and matching

use regex::Regex;

use crate::record::TimezoneRecord;

/// Free-text lookup: every term must appear somewhere in a record's searchable text.
#[derive(Debug, Clone, Default)]
pub struct Query {
    terms: Vec<String>,
    id_patterns: Vec<Regex>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw `q` text: trim, lowercase, split on whitespace runs.
    pub fn parse(raw: &str) -> Self {
        Self::new().with_terms(parse_terms(raw))
    }

    pub fn with_terms(mut self, terms: Vec<String>) -> Self {
        self.terms = terms;
        self
    }

    /// Regex patterns of which at least one must match the zone id.
    pub fn with_id_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.id_patterns = patterns;
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.id_patterns.is_empty()
    }

    /// Check whether the record satisfies every term and id pattern.
    pub fn matches(&self, record: &TimezoneRecord) -> bool {
        if !self.id_patterns.is_empty()
            && !self.id_patterns.iter().any(|re| re.is_match(&record.id))
        {
            return false;
        }

        if self.terms.is_empty() {
            return true;
        }

        let searchable = record.searchable();
        self.terms.iter().all(|term| searchable.contains(term.as_str()))
    }
}

pub fn parse_terms(raw: &str) -> Vec<String> {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Stable filter: matching records keep their relative order.
pub fn filter<'a>(records: &'a [TimezoneRecord], query: &Query) -> Vec<&'a TimezoneRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }

    records.iter().filter(|record| query.matches(record)).collect()
}
