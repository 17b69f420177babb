//! Timezone records and the field derivations behind them

use serde::{Deserialize, Serialize};

/// One enriched IANA zone, as stored in the catalog artifact and served over HTTP.
///
/// Field order matches the artifact layout. Optional fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneRecord {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub utc_offset: String,
    pub abbreviations: Vec<String>,
}

impl TimezoneRecord {
    /// Lowercased text the query predicate searches.
    ///
    /// Id, country code, country name, city and abbreviations joined with
    /// single spaces; an absent field leaves an empty slot.
    pub fn searchable(&self) -> String {
        let fixed = [
            Some(self.id.as_str()),
            self.country_code.as_deref(),
            self.country_name.as_deref(),
            self.city.as_deref(),
        ];

        fixed
            .into_iter()
            .map(|slot| slot.unwrap_or(""))
            .chain(self.abbreviations.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// City label for a zone id: the last path segment with underscores as spaces.
///
/// Zones under the `Etc` namespace have no city.
pub fn derive_city(id: &str) -> Option<String> {
    let mut components = id.split('/');
    if components.next() == Some("Etc") {
        return None;
    }

    id.rsplit('/').next().map(|last| last.replace('_', " "))
}

/// Display name: path segments joined by ` / `, annotated with the country
/// unless the name already mentions it (case-insensitive).
pub fn derive_name(id: &str, country_name: Option<&str>) -> String {
    let mut name = id
        .split('/')
        .map(|component| component.replace('_', " "))
        .collect::<Vec<_>>()
        .join(" / ");

    if let Some(country) = country_name.filter(|c| !c.is_empty()) {
        if !name.to_lowercase().contains(&country.to_lowercase()) {
            name.push_str(&format!(" ({country})"));
        }
    }

    name
}

/// Render a signed minute offset as `±HH:MM`; zero is `+00:00`.
pub fn format_utc_offset(minutes: i32) -> String {
    let sign = if minutes >= 0 { '+' } else { '-' };
    let magnitude = minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_replaces_underscores_in_last_segment() {
        assert_eq!(derive_city("America/New_York").as_deref(), Some("New York"));
        assert_eq!(
            derive_city("America/Argentina/Buenos_Aires").as_deref(),
            Some("Buenos Aires")
        );
    }

    #[test]
    fn etc_zones_have_no_city() {
        assert_eq!(derive_city("Etc/GMT+5"), None);
        assert_eq!(derive_city("Etc/UTC"), None);
    }

    #[test]
    fn name_appends_country_only_when_missing() {
        assert_eq!(
            derive_name("America/New_York", Some("United States")),
            "America / New York (United States)"
        );
        assert_eq!(derive_name("Asia/Singapore", Some("Singapore")), "Asia / Singapore");
        assert_eq!(derive_name("Etc/GMT-3", None), "Etc / GMT-3");
    }

    #[test]
    fn offsets_are_zero_padded_and_signed() {
        assert_eq!(format_utc_offset(0), "+00:00");
        assert_eq!(format_utc_offset(60), "+01:00");
        assert_eq!(format_utc_offset(-300), "-05:00");
        assert_eq!(format_utc_offset(-570), "-09:30");
        assert_eq!(format_utc_offset(345), "+05:45");
        assert_eq!(format_utc_offset(840), "+14:00");
    }

    #[test]
    fn searchable_keeps_slot_order_and_lowercases() {
        let record = TimezoneRecord {
            id: "Europe/Paris".into(),
            name: "Europe / Paris (France)".into(),
            city: Some("Paris".into()),
            country_name: Some("France".into()),
            country_code: Some("FR".into()),
            utc_offset: "+01:00".into(),
            abbreviations: vec!["CEST".into(), "CET".into()],
        };

        assert_eq!(record.searchable(), "europe/paris fr france paris cest cet");
    }

    #[test]
    fn searchable_leaves_empty_slots_for_absent_fields() {
        let record = TimezoneRecord {
            id: "Etc/GMT-3".into(),
            name: "Etc / GMT-3".into(),
            city: None,
            country_name: None,
            country_code: None,
            utc_offset: "+03:00".into(),
            abbreviations: vec!["GMT+3".into()],
        };

        assert_eq!(record.searchable(), "etc/gmt-3    gmt+3");
    }
}
