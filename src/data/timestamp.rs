//! Timestamp Module
//! Strict parsing of `install_time` values and the install cutoff.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// chrono format of `install_time` values.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse `"YYYY-MM-DD HH:MM:SS"`, rejecting anything else.
///
/// chrono alone accepts unpadded fields and signed years, so the fixed
/// layout is checked before handing the value over.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let bytes = s.as_bytes();
    if bytes.len() != 19 {
        return None;
    }
    let layout_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b' ',
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    });
    if !layout_ok {
        return None;
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Rows must be installed strictly after this instant to survive cleaning.
pub fn install_cutoff() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 7, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_layout() {
        let ts = parse_timestamp("2018-07-02 10:00:00").unwrap();
        assert_eq!(ts.to_string(), "2018-07-02 10:00:00");
    }

    #[test]
    fn rejects_near_misses() {
        for bad in [
            "2018-13-40",
            "2018-13-01 00:00:00",
            "2018-02-30 00:00:00",
            "2018-7-02 10:00:00",
            "2018/07/02 10:00:00",
            "2018-07-02T10:00:00",
            " 2018-07-02 10:00:00",
            "2018-07-02 25:00:00",
            "",
        ] {
            assert!(parse_timestamp(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn cutoff_is_first_of_july_2018() {
        assert_eq!(install_cutoff().to_string(), "2018-07-01 00:00:00");
        assert!(parse_timestamp("2018-07-01 00:00:00").unwrap() <= install_cutoff());
        assert!(parse_timestamp("2018-07-01 00:00:01").unwrap() > install_cutoff());
    }
}
