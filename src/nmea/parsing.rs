use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Splits a raw sentence into its comma-separated fields.
///
/// Returns `None` for blank lines and lines that do not start with `$`.
/// Everything from the first `*` on is dropped without checking the checksum.
pub fn sentence_fields(line: &str) -> Option<Vec<&str>> {
    if line.trim().is_empty() || !line.starts_with('$') {
        return None;
    }

    let body = line.trim();
    let body = match body.find('*') {
        Some(idx) => &body[..idx],
        None => body,
    };

    Some(body.split(',').collect())
}

/// Converts an NMEA `DDMM.MMMM` / `DDDMM.MMMM` coordinate to signed decimal degrees.
pub fn nmea_to_decimal(raw: &str, hemisphere: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    Some(raw_to_decimal(value, hemisphere))
}

pub(crate) fn raw_to_decimal(value: f64, hemisphere: &str) -> f64 {
    let degrees = (value / 100.0).floor();
    let minutes = value - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;

    match hemisphere {
        "S" | "W" => -decimal,
        _ => decimal,
    }
}

/// Joins an RMC `DDMMYY` date and `HHMMSS[.ss]` time into a UTC timestamp.
/// Sub-second digits are ignored.
pub fn parse_rmc_datetime(time: &str, date: &str) -> Option<DateTime<Utc>> {
    if date.len() != 6 {
        return None;
    }
    let hhmmss = time.get(..6)?;
    let joined = format!("{}{}", date, hhmmss);
    // chrono tolerates padding spaces inside numeric fields
    if !joined.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(&joined, "%d%m%y%H%M%S").ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_sentence_fields_strips_checksum() {
        let fields = sentence_fields("$GPGGA,123519,4807.038,N*47\r\n").unwrap();
        assert_eq!(fields, vec!["$GPGGA", "123519", "4807.038", "N"]);
    }

    #[test]
    fn test_sentence_fields_rejects_noise() {
        assert!(sentence_fields("").is_none());
        assert!(sentence_fields("   ").is_none());
        assert!(sentence_fields("GPGGA,1,2").is_none());
        assert!(sentence_fields(" $GPGGA,1,2").is_none());
    }

    #[test]
    fn test_nmea_to_decimal() {
        let lat = nmea_to_decimal("4807.038", "N").unwrap();
        assert!((lat - 48.1173).abs() < 1e-4);

        let lon = nmea_to_decimal("01131.000", "E").unwrap();
        assert!((lon - 11.5167).abs() < 1e-4);

        let south = nmea_to_decimal("3352.128", "S").unwrap();
        assert!((south + 33.8688).abs() < 1e-4);

        assert!(nmea_to_decimal("", "N").is_none());
        assert!(nmea_to_decimal("abc", "W").is_none());
    }

    #[test]
    fn test_parse_rmc_datetime() {
        let t = parse_rmc_datetime("123519.00", "230394").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (1994, 3, 23));
        assert_eq!((t.hour(), t.minute(), t.second()), (12, 35, 19));

        let t = parse_rmc_datetime("000000", "010125").unwrap();
        assert_eq!(t.year(), 2025);
    }

    #[test]
    fn test_parse_rmc_two_digit_year_pivot() {
        let year = |date| parse_rmc_datetime("000000", date).unwrap().year();
        assert_eq!(year("010155"), 2055);
        assert_eq!(year("010169"), 2069);
        assert_eq!(year("010170"), 1970);
        assert_eq!(year("010199"), 1999);
    }

    #[test]
    fn test_parse_rmc_datetime_malformed() {
        assert!(parse_rmc_datetime("1235", "230394").is_none());
        assert!(parse_rmc_datetime("123519", "2303").is_none());
        assert!(parse_rmc_datetime("126019", "230394").is_none());
        assert!(parse_rmc_datetime("123519", "320194").is_none());
        assert!(parse_rmc_datetime("1235 9", "230394").is_none());
        assert!(parse_rmc_datetime("123519", "23 394").is_none());
        assert!(parse_rmc_datetime("+23519", "230394").is_none());
    }
}
