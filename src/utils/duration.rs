//! Duration code parsing
//!
//! Parses the short duration codes accepted by configuration commands,
//! e.g. `30s`, `10m`, `2h`, `1d`, `1w`, `1M`, `1y`.

use std::sync::OnceLock;

use regex::Regex;

use crate::utils::errors::{Result, SweepBotError};

/// Seconds per unit letter. `m` is minutes, `M` is months (30 days).
const UNIT_SECONDS: &[(char, i64)] = &[
    ('s', 1),
    ('m', 60),
    ('h', 3_600),
    ('d', 86_400),
    ('w', 604_800),
    ('M', 2_592_000),
    ('y', 31_536_000),
];

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)([smhdwMy])$").expect("valid duration regex"))
}

/// Parse a duration code into a number of seconds.
///
/// The grammar is `<positive integer><unit letter>` with no whitespace.
/// Zero magnitudes, missing or unknown units, and values that overflow i64
/// seconds are all rejected.
pub fn parse_duration(code: &str) -> Result<i64> {
    let captures = duration_regex()
        .captures(code.trim())
        .ok_or_else(|| SweepBotError::InvalidDuration(format!("'{code}' is not a duration code")))?;

    let magnitude: i64 = captures[1]
        .parse()
        .map_err(|_| SweepBotError::InvalidDuration(format!("'{}' is too large", &captures[1])))?;

    if magnitude == 0 {
        return Err(SweepBotError::InvalidDuration(
            "magnitude must be positive".to_string(),
        ));
    }

    let unit = captures[2].chars().next().expect("regex guarantees a unit");
    let multiplier = UNIT_SECONDS
        .iter()
        .find(|(u, _)| *u == unit)
        .map(|(_, s)| *s)
        .expect("regex guarantees a known unit");

    magnitude
        .checked_mul(multiplier)
        .ok_or_else(|| SweepBotError::InvalidDuration(format!("'{code}' overflows")))
}

/// Render a delay in seconds back into a short human-readable form.
///
/// Picks the largest unit that divides the value evenly, falling back to raw
/// seconds. Zero renders as "off".
pub fn format_delay(seconds: i64) -> String {
    if seconds <= 0 {
        return "off".to_string();
    }

    for (unit, multiplier) in UNIT_SECONDS.iter().rev() {
        if seconds % multiplier == 0 {
            return format!("{}{}", seconds / multiplier, unit);
        }
    }

    format!("{seconds}s")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse_all_units() {
        assert_eq!(parse_duration("1s").unwrap(), 1);
        assert_eq!(parse_duration("5m").unwrap(), 300);
        assert_eq!(parse_duration("2h").unwrap(), 7_200);
        assert_eq!(parse_duration("1d").unwrap(), 86_400);
        assert_eq!(parse_duration("3w").unwrap(), 1_814_400);
        assert_eq!(parse_duration("1M").unwrap(), 2_592_000);
        assert_eq!(parse_duration("1y").unwrap(), 31_536_000);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_duration(" 10m ").unwrap(), 600);
    }

    #[test]
    fn test_parse_rejects_zero() {
        assert_matches!(parse_duration("0s"), Err(SweepBotError::InvalidDuration(_)));
        assert_matches!(parse_duration("00m"), Err(SweepBotError::InvalidDuration(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for code in ["", "10", "m", "-5m", "5 m", "5x", "5mm", "m5", "5.5h", "ten minutes"] {
            assert_matches!(
                parse_duration(code),
                Err(SweepBotError::InvalidDuration(_)),
                "code {code:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_matches!(
            parse_duration("99999999999999999999s"),
            Err(SweepBotError::InvalidDuration(_))
        );
        assert_matches!(
            parse_duration("9999999999999y"),
            Err(SweepBotError::InvalidDuration(_))
        );
    }

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(0), "off");
        assert_eq!(format_delay(-1), "off");
        assert_eq!(format_delay(45), "45s");
        assert_eq!(format_delay(300), "5m");
        assert_eq!(format_delay(7_200), "2h");
        assert_eq!(format_delay(604_800), "1w");
        assert_eq!(format_delay(90), "90s");
    }

    proptest! {
        #[test]
        fn prop_valid_codes_multiply(magnitude in 1i64..1_000_000, unit_idx in 0usize..UNIT_SECONDS.len()) {
            let (unit, multiplier) = UNIT_SECONDS[unit_idx];
            let code = format!("{magnitude}{unit}");
            prop_assert_eq!(parse_duration(&code).unwrap(), magnitude * multiplier);
        }

        #[test]
        fn prop_parse_format_round_trip(magnitude in 1i64..10_000, unit_idx in 0usize..UNIT_SECONDS.len()) {
            let (unit, _) = UNIT_SECONDS[unit_idx];
            let code = format!("{magnitude}{unit}");
            let seconds = parse_duration(&code).unwrap();
            prop_assert_eq!(parse_duration(&format_delay(seconds)).unwrap(), seconds);
        }

        #[test]
        fn prop_garbage_rejected(code in "[a-zA-Z ]{1,8}") {
            prop_assert!(parse_duration(&code).is_err());
        }
    }
}
