use chrono::{DateTime, Duration, Utc};

const MAX_COMPONENT: i64 = 10_000;

/// 解析相对时长，例如 `1h`、`7d`、`2w`、`1d12h`
///
/// 月按 30 天、年按 365 天近似
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    let mut total_duration = Duration::zero();
    let mut remaining = input;

    while !remaining.is_empty() {
        let digits_len = remaining
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(remaining.len());
        let num_str = &remaining[..digits_len];
        if num_str.is_empty() {
            return Err(format!("Invalid duration format: '{}'", input));
        }

        let num: i64 = num_str
            .parse()
            .map_err(|_| format!("Invalid number: '{}'", num_str))?;
        if num > MAX_COMPONENT {
            return Err(format!("Duration component too large: '{}'", num_str));
        }
        remaining = &remaining[digits_len..];

        let unit_len = remaining
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(remaining.len());
        let unit_str = &remaining[..unit_len];
        if unit_str.is_empty() {
            return Err(format!("Missing time unit after '{}'", num));
        }

        let duration = match unit_str {
            "M" | "month" | "months" => Duration::days(num * 30),
            _ => match unit_str.to_lowercase().as_str() {
                "s" | "sec" | "second" | "seconds" => Duration::seconds(num),
                "m" | "min" | "minute" | "minutes" => Duration::minutes(num),
                "h" | "hour" | "hours" => Duration::hours(num),
                "d" | "day" | "days" => Duration::days(num),
                "w" | "week" | "weeks" => Duration::weeks(num),
                "y" | "year" | "years" => Duration::days(num * 365),
                _ => return Err(format!("Unsupported time unit: '{}'", unit_str)),
            },
        };

        total_duration = total_duration
            .checked_add(&duration)
            .ok_or_else(|| format!("Duration is out of range: '{}'", input))?;
        remaining = &remaining[unit_len..];
    }

    if total_duration == Duration::zero() {
        return Err("Duration must not be zero".to_string());
    }

    Ok(total_duration)
}

/// 以 `now` 为结束时间，回看 `input` 指定的时长
pub fn lookback_range(
    input: &str,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), String> {
    let duration = parse_duration(input)?;
    let start = now
        .checked_sub_signed(duration)
        .ok_or_else(|| "Duration is out of range".to_string())?;
    Ok((start, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse_duration("1d").unwrap(), Duration::days(1));
        assert_eq!(parse_duration("2w").unwrap(), Duration::days(14));
        assert_eq!(parse_duration("3h").unwrap(), Duration::hours(3));
        assert_eq!(parse_duration("1M").unwrap(), Duration::days(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::minutes(5));
    }

    #[test]
    fn test_parse_combined() {
        assert_eq!(
            parse_duration("1d12h").unwrap(),
            Duration::days(1) + Duration::hours(12)
        );
    }

    #[test]
    fn test_invalid_format() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("1x").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("0d").is_err());
    }

    #[test]
    fn test_lookback_range() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        let (start, end) = lookback_range("7d", now).unwrap();
        assert_eq!(end, now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }
}
