//! Short timezone names sampled across a calendar year

use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeZone, Timelike};
use chrono_tz::Tz;
use icu_calendar::Date;
use icu_datetime::fieldsets::zone::SpecificShort;
use icu_datetime::NoCalendarFormatter;
use icu_locale::{locale, Locale, LocaleExpander};
use icu_time::zone::{IanaParser, UtcOffset, VariantOffsetsCalculator};
use icu_time::{DateTime as IcuDateTime, Time};

/// Locale whose conventions name a country's zones: `und-<code>` maximized
/// to `<language>-<region>`, or `en` when no such locale can be built.
pub fn locale_for_country(code: Option<&str>) -> Locale {
    let Some(mut locale) = code.and_then(|c| format!("und-{c}").parse::<Locale>().ok()) else {
        return locale!("en");
    };

    LocaleExpander::new_extended().maximize(&mut locale.id);
    locale.id.script = None;
    locale
}

/// Collect the distinct short names `id` shows on the 1st of each month of `year`,
/// formatted for the locale of `country_code`.
///
/// Twelve fixed samples pick up both standard and daylight-saving names without
/// walking transition tables. Returns an empty list for ids the bundled tz
/// database does not know.
pub fn sample_abbreviations(id: &str, country_code: Option<&str>, year: i32) -> Vec<String> {
    let Ok(tz) = id.parse::<Tz>() else {
        tracing::warn!(zone = id, "zone missing from tz database; no abbreviations");
        return Vec::new();
    };

    let formatter = match short_name_formatter(locale_for_country(country_code)) {
        Some(formatter) => formatter,
        None => {
            tracing::warn!(zone = id, "no short-name formatter available; no abbreviations");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = (1..=12)
        .filter_map(|month| first_of_month(&tz, year, month))
        .filter_map(|instant| short_name(&formatter, id, &instant))
        .collect();

    names.sort();
    names.dedup();
    names
}

fn short_name_formatter(locale: Locale) -> Option<NoCalendarFormatter<SpecificShort>> {
    NoCalendarFormatter::try_new(locale.clone().into(), SpecificShort)
        .or_else(|err| {
            tracing::debug!(%locale, %err, "falling back to en short names");
            NoCalendarFormatter::try_new(locale!("en").into(), SpecificShort)
        })
        .ok()
}

/// Local midnight on the 1st; a midnight skipped by a DST gap is read as UTC.
fn first_of_month(tz: &Tz, year: i32, month: u32) -> Option<DateTime<Tz>> {
    let naive = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| Some(tz.from_utc_datetime(&naive)))
}

fn short_name(
    formatter: &NoCalendarFormatter<SpecificShort>,
    id: &str,
    instant: &DateTime<Tz>,
) -> Option<String> {
    let offset = UtcOffset::try_from_seconds(instant.offset().fix().local_minus_utc()).ok()?;
    let local = instant.naive_local();
    let wall = IcuDateTime {
        date: Date::try_new_iso(local.year(), local.month() as u8, local.day() as u8).ok()?,
        time: Time::try_new(local.hour() as u8, local.minute() as u8, local.second() as u8, 0)
            .ok()?,
    };

    let zone = IanaParser::new()
        .parse(id)
        .with_offset(Some(offset))
        .at_date_time_iso(wall)
        .infer_variant(VariantOffsetsCalculator::new());

    Some(formatter.format(&zone).to_string())
}
