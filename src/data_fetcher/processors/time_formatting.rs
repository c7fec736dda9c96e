use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};

/// Input pattern for provider kickoff timestamps: date, `T`, seconds, and a
/// `+HH:MM` offset. A literal `Z` is accepted as `+00:00`.
const KICKOFF_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Parses a provider kickoff timestamp with the fixed input pattern.
///
/// Returns `None` for anything that does not match exactly (fractional
/// seconds, missing offset, date-only strings, ...).
///
/// # Examples
///
/// ```rust
/// use scoreline::data_fetcher::processors::parse_kickoff;
///
/// assert!(parse_kickoff("2024-01-15T20:00:00+00:00").is_some());
/// assert!(parse_kickoff("2024-01-15T20:00:00Z").is_some());
/// assert!(parse_kickoff("2024-01-15").is_none());
/// ```
pub fn parse_kickoff(raw: &str) -> Option<DateTime<FixedOffset>> {
    let normalized;
    let input = match raw.strip_suffix('Z') {
        Some(stripped) => {
            normalized = format!("{stripped}+00:00");
            normalized.as_str()
        }
        None => raw,
    };
    DateTime::parse_from_str(input, KICKOFF_PATTERN).ok()
}

/// Kickoff instant in UTC, or `None` when the timestamp is missing or unparsable.
pub fn kickoff_instant(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_kickoff)
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats a kickoff timestamp as "HH:MM" in the given timezone.
pub fn format_kickoff_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    parse_kickoff(raw).map(|dt| dt.with_timezone(tz).format("%H:%M").to_string())
}

/// Formats a kickoff timestamp as local "HH:MM".
pub fn format_kickoff_local(raw: &str) -> Option<String> {
    format_kickoff_in(raw, &Local)
}

/// The date string used by the TODAY filter ("YYYY-MM-DD").
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's local date.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
