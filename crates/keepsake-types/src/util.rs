use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Format a timestamp the way browsers print `Date#toISOString`
/// (`2024-10-01T12:00:00.000Z`).
pub fn format_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drop sub-millisecond precision so a timestamp survives a trip through
/// its ISO-8601 string unchanged.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// Keep the first `max` characters of `s` (char-boundary safe, no suffix).
pub fn take_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Lowercase base-36 rendering of `value`.
pub fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Serde codec for `DateTime<Utc>` as a millisecond ISO-8601 string.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_iso(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_iso_uses_millis_and_z() {
        let ts = Utc.with_ymd_and_hms(2022, 10, 1, 18, 30, 5).unwrap();
        assert_eq!(format_iso(&ts), "2022-10-01T18:30:05.000Z");
    }

    #[test]
    fn test_truncate_to_millis_drops_nanos() {
        let ts = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        let truncated = truncate_to_millis(ts);
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_take_chars_is_char_safe() {
        assert_eq!(take_chars("💕💕💕", 2), "💕💕");
        assert_eq!(take_chars("short", 50), "short");
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
