use std::str::FromStr;
use std::time::Duration;

/// Durations like `30s`, `15m`, `1h15m30s` or `1d`. A bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if c.is_whitespace() {
                continue;
            } else {
                let num = current_number
                    .parse::<u64>()
                    .map_err(|_| format!("Expected a number before '{}'", c))?;
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    'd' => 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_value = true;
            }
        }

        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration too large".to_string())?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> u64 {
        s.parse::<HumanDuration>().unwrap().0.as_secs()
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(secs("45"), 45);
        assert_eq!(secs("30s"), 30);
        assert_eq!(secs("15m"), 900);
        assert_eq!(secs("1h15m30s"), 4530);
        assert_eq!(secs("1d"), 86400);
        assert_eq!(secs("1h 30m"), 5400);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("h".parse::<HumanDuration>().is_err());
        assert!("10w".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(
            "300000000000000d".parse::<HumanDuration>(),
            Err("Duration too large".to_string())
        );
        assert!("18446744073709551615s1s".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615s 1".parse::<HumanDuration>().is_err());
        assert_eq!(secs("18446744073709551615s"), u64::MAX);
    }
}
