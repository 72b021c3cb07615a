use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::Error;

/// A requested slide, either by index or relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchTarget {
    /// Plain index, e.g. `"2"`
    Absolute(i64),
    /// Signed shift, e.g. `"+1"` or `"-3"`
    Relative(i64),
}

impl SwitchTarget {
    /// Resolve against the projector's logical current index
    pub fn resolve(self, current_index: i64) -> i64 {
        match self {
            SwitchTarget::Absolute(index) => index,
            SwitchTarget::Relative(shift) => current_index + shift,
        }
    }
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([+-]?)([0-9]+)$").expect("static pattern"))
}

impl FromStr for SwitchTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = pattern()
            .captures(s)
            .ok_or_else(|| Error::InvalidTarget(s.to_string()))?;

        let amount: i64 = captures[2]
            .parse()
            .map_err(|_| Error::InvalidTarget(s.to_string()))?;

        Ok(match &captures[1] {
            "+" => SwitchTarget::Relative(amount),
            "-" => SwitchTarget::Relative(-amount),
            _ => SwitchTarget::Absolute(amount),
        })
    }
}

/// Numbers go through their decimal form, so negatives become backward shifts
impl From<i64> for SwitchTarget {
    fn from(index: i64) -> Self {
        if index < 0 {
            SwitchTarget::Relative(index)
        } else {
            SwitchTarget::Absolute(index)
        }
    }
}

impl fmt::Display for SwitchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchTarget::Absolute(index) => write!(f, "{}", index),
            SwitchTarget::Relative(shift) if *shift < 0 => write!(f, "{}", shift),
            SwitchTarget::Relative(shift) => write!(f, "+{}", shift),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        assert_eq!("0".parse::<SwitchTarget>().unwrap(), SwitchTarget::Absolute(0));
        assert_eq!("12".parse::<SwitchTarget>().unwrap(), SwitchTarget::Absolute(12));
    }

    #[test]
    fn test_parse_relative() {
        assert_eq!("+1".parse::<SwitchTarget>().unwrap(), SwitchTarget::Relative(1));
        assert_eq!("-3".parse::<SwitchTarget>().unwrap(), SwitchTarget::Relative(-3));
        assert_eq!("+0".parse::<SwitchTarget>().unwrap(), SwitchTarget::Relative(0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "+", "1.5", "abc", " 1", "1 ", "++1", "+-1", "٣", "99999999999999999999"] {
            assert!(input.parse::<SwitchTarget>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(SwitchTarget::Absolute(4).resolve(7), 4);
        assert_eq!(SwitchTarget::Relative(2).resolve(7), 9);
        assert_eq!(SwitchTarget::Relative(-9).resolve(7), -2);
    }

    #[test]
    fn test_from_integer() {
        assert_eq!(SwitchTarget::from(3), SwitchTarget::Absolute(3));
        assert_eq!(SwitchTarget::from(-2), SwitchTarget::Relative(-2));
    }

    #[test]
    fn test_display_round_trips_sign() {
        assert_eq!(SwitchTarget::Relative(0).to_string(), "+0");
        assert_eq!(SwitchTarget::Relative(-4).to_string(), "-4");
        assert_eq!(SwitchTarget::Absolute(4).to_string(), "4");
    }
}
