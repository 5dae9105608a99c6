//! Date helper functions

use chrono::{DateTime, FixedOffset, Locale, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Formats API publication dates for display
///
/// Holds the chrono format, the locale used for month/day names and the
/// timezone dates are shown in.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    format: String,
    locale: Locale,
    timezone: Tz,
}

impl DateFormatter {
    /// Build from a moment-style format (`DD MMM YYYY`), a language tag
    /// (`pt-BR`) and an IANA timezone name (empty for UTC)
    pub fn new(format: &str, language: &str, timezone: &str) -> Self {
        let locale = parse_locale(language).unwrap_or_else(|| {
            tracing::warn!("Unknown language {:?}, formatting dates in POSIX locale", language);
            Locale::POSIX
        });
        let timezone = if timezone.trim().is_empty() {
            Tz::UTC
        } else {
            timezone.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!("Unknown timezone {:?}, using UTC", timezone);
                Tz::UTC
            })
        };

        Self {
            format: moment_to_chrono_format(format),
            locale,
            timezone,
        }
    }

    /// Format a raw API timestamp, `None` if it cannot be parsed
    pub fn format(&self, raw: &str) -> Option<String> {
        let date = parse_api_date(raw)?;
        Some(self.format_date(&date))
    }

    pub fn format_date<T: TimeZone>(&self, date: &DateTime<T>) -> String {
        date.with_timezone(&self.timezone)
            .format_localized(&self.format, self.locale)
            .to_string()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new("DD MMM YYYY", "pt-BR", "")
    }
}

/// Parse an API timestamp
///
/// The content API writes offsets without a colon (`2021-03-15T19:25:28+0000`),
/// so RFC 3339 is tried first and the compact form second.
pub fn parse_api_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        })
}

/// Map a language tag (`pt-BR`, `en`) to a chrono locale
pub fn parse_locale(language: &str) -> Option<Locale> {
    let tag = language.trim().replace('-', "_");
    match tag.as_str() {
        "" => None,
        "en" => Some(Locale::en_US),
        "pt" => Some(Locale::pt_BR),
        _ => Locale::try_from(tag.as_str()).ok(),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longer tokens first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
