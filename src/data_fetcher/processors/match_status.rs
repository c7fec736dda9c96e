use crate::constants::status_codes;
use crate::data_fetcher::models::MatchStatus;

/// Classifies a provider short status code into a status class.
///
/// Codes are matched exactly against the fixed LIVE, FINISHED and UPCOMING
/// sets; anything else is [`MatchStatus::Unknown`].
///
/// # Examples
///
/// ```rust
/// use scoreline::data_fetcher::models::MatchStatus;
/// use scoreline::data_fetcher::processors::classify_status;
///
/// assert_eq!(classify_status("2H"), MatchStatus::Live);
/// assert_eq!(classify_status("PEN"), MatchStatus::Finished);
/// assert_eq!(classify_status("NS"), MatchStatus::Upcoming);
/// assert_eq!(classify_status("SUSP"), MatchStatus::Unknown);
/// ```
pub fn classify_status(short_code: &str) -> MatchStatus {
    if status_codes::LIVE.contains(&short_code) {
        MatchStatus::Live
    } else if status_codes::FINISHED.contains(&short_code) {
        MatchStatus::Finished
    } else if status_codes::UPCOMING.contains(&short_code) {
        MatchStatus::Upcoming
    } else {
        MatchStatus::Unknown
    }
}

/// Builds the short minute column for a match.
///
/// Priority: live with a known elapsed minute shows `"{elapsed}'"`; a code from
/// the verbatim display set shows the code; upcoming shows the formatted kickoff
/// or `"TBD"`; anything else shows the raw code.
pub fn match_minute(
    status: MatchStatus,
    short_code: &str,
    elapsed: Option<u32>,
    kickoff_formatted: Option<&str>,
) -> String {
    if status == MatchStatus::Live
        && let Some(elapsed) = elapsed
    {
        return format!("{elapsed}'");
    }

    if status_codes::DISPLAYED_VERBATIM.contains(&short_code) {
        return short_code.to_string();
    }

    if status == MatchStatus::Upcoming {
        return kickoff_formatted.unwrap_or("TBD").to_string();
    }

    short_code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_code_has_exactly_one_class() {
        for code in status_codes::LIVE {
            assert_eq!(classify_status(code), MatchStatus::Live, "{code}");
        }
        for code in status_codes::FINISHED {
            assert_eq!(classify_status(code), MatchStatus::Finished, "{code}");
        }
        for code in status_codes::UPCOMING {
            assert_eq!(classify_status(code), MatchStatus::Upcoming, "{code}");
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in ["SUSP", "INT", "ET", "BT", "P", "", "ft"] {
            assert_eq!(classify_status(code), MatchStatus::Unknown, "{code:?}");
        }
    }

    #[test]
    fn test_live_minute_uses_elapsed() {
        assert_eq!(match_minute(MatchStatus::Live, "2H", Some(67), None), "67'");
    }

    #[test]
    fn test_half_time_without_elapsed_shows_code() {
        assert_eq!(match_minute(MatchStatus::Live, "HT", None, None), "HT");
    }

    #[test]
    fn test_half_time_with_elapsed_prefers_minute() {
        assert_eq!(match_minute(MatchStatus::Live, "HT", Some(45), None), "45'");
    }

    #[test]
    fn test_live_without_elapsed_falls_back_to_code() {
        assert_eq!(match_minute(MatchStatus::Live, "1H", None, None), "1H");
    }

    #[test]
    fn test_finished_codes_verbatim() {
        assert_eq!(match_minute(MatchStatus::Finished, "FT", Some(90), None), "FT");
        assert_eq!(match_minute(MatchStatus::Finished, "PEN", Some(120), None), "PEN");
        assert_eq!(match_minute(MatchStatus::Finished, "CANC", None, None), "CANC");
    }

    #[test]
    fn test_upcoming_uses_kickoff_or_tbd() {
        assert_eq!(
            match_minute(MatchStatus::Upcoming, "NS", None, Some("20:45")),
            "20:45"
        );
        assert_eq!(match_minute(MatchStatus::Upcoming, "TBD", None, None), "TBD");
    }

    #[test]
    fn test_unknown_shows_raw_code() {
        assert_eq!(match_minute(MatchStatus::Unknown, "SUSP", Some(30), None), "SUSP");
    }
}
