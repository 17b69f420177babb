//! tzfind-core: a pocket atlas of the world's clocks
//!
//! Every IANA zone gets a small index card: where it is, which country keeps
//! it, how far it sits from UTC, and what people call it in winter and in
//! summer. This library writes those cards once and then answers questions
//! about them for as long as the process lives.
//!
//! ## Two Acts
//!
//! **Building**: turning reference data into a catalog
//! - Drops aliases and bare pseudo-zones such as `UTC`
//! - Names each zone after its path and, where it helps, its country
//! - Samples the 1st of every month to catch both standard and DST names
//! - Sorts the cards by name and writes them as indented JSON
//!
//! **Finding**: asking the catalog polite questions
//! - Splits the question into lowercase terms
//! - Keeps a card only when every term shows up on it
//! - Never reorders, never mutates, never forgets
//!
//! ## A Sample Conversation
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tzfind_core::builder::{build_catalog, BuildOptions};
//! use tzfind_core::catalog::{write_catalog_file, Catalog};
//! use tzfind_core::query::Query;
//! use tzfind_core::reference::ReferenceDb;
//!
//! let reference = ReferenceDb::load(Path::new("data/countries-and-timezones.json"))?;
//! let records = build_catalog(&reference, &BuildOptions::default())?;
//! write_catalog_file(&records, Path::new("timezones.json"))?;
//!
//! let catalog = Catalog::from_records(records);
//! for record in catalog.search(&Query::parse("new york")) {
//!     println!("{} {}", record.id, record.utc_offset);
//! }
//! #
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## The Cast of Characters
//!
//! - [`record::TimezoneRecord`]: one index card
//! - [`reference::ReferenceData`]: where the raw zone and country facts come from
//! - [`catalog::Catalog`]: the shelf of cards, loaded once and only read after
//! - [`query::Query`]: the question being asked

pub mod abbrev;
pub mod builder;
pub mod catalog;
pub mod output;
pub mod query;
pub mod record;
pub mod reference;
