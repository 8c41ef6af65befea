//! # Shared Utility Functions
//!
//! Display formatting used by every screen of the client.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_currency, format_signed_currency, truncate_id};
//!
//! assert_eq!(format_currency(12_345.678), "$12,345.68");
//! assert_eq!(format_signed_currency(-40.0), "-$40.00");
//! assert_eq!(truncate_id("665f1c2ab9e0d41f88c1a7e2", 4, 4), "665f...a7e2");
//! ```

use chrono::{DateTime, Utc};

/// Shorten a record identifier by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the identifier is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_id;
///
/// let id = "665f1c2ab9e0d41f88c1a7e2";
/// assert_eq!(truncate_id(id, 4, 4), "665f...a7e2");
/// assert_eq!(truncate_id("short", 4, 4), "short");
/// ```
pub fn truncate_id(id: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = id.chars().collect();
    let len = chars.len();

    if len <= prefix_len + suffix_len {
        return id.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[len - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// Group the integer part of a non-negative decimal string with commas.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a number with thousands separators and a fixed number of decimals.
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted.clone(), None),
    };

    // Avoid "-0.00" for values that round to zero
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, group_thousands(&int_part), frac),
        None => format!("{}{}", sign, group_thousands(&int_part)),
    }
}

/// Format a USD amount: `$1,234.56`, `-$40.00`.
pub fn format_currency(amount: f64) -> String {
    let body = format_number(amount.abs(), 2);
    if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Format a P&L amount with an explicit sign: `+$60.00`, `-$40.00`.
pub fn format_signed_currency(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{}", format_currency(amount))
    } else {
        format_currency(amount)
    }
}

/// Format a percentage change with sign: `+1.25%`, `-0.40%`.
pub fn format_percent_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

/// Format a market price, keeping more precision for sub-dollar assets.
pub fn format_price(price: f64) -> String {
    if price.abs() >= 1.0 {
        format!("${}", format_number(price, 2))
    } else {
        let trimmed = format!("{:.8}", price);
        let trimmed = trimmed.trim_end_matches('0');
        let trimmed = if trimmed.ends_with('.') {
            format!("{}00", trimmed)
        } else {
            trimmed.to_string()
        };
        format!("${}", trimmed)
    }
}

/// Render an RFC 3339 timestamp as `Jun 04, 2024 10:00`; unparseable input is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Utc).format("%b %d, %Y %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Human-friendly age of a timestamp relative to `now`: `5 minutes ago`.
pub fn format_relative(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let secs = (now - then.with_timezone(&Utc)).num_seconds().max(0);

    let (value, unit) = match secs {
        s if s < 60 => return "just now".to_string(),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s => (s / 86_400, "day"),
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{} {}{} ago", value, unit, plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_id() {
        let id = "665f1c2ab9e0d41f88c1a7e2";
        assert_eq!(truncate_id(id, 4, 4), "665f...a7e2");
        assert_eq!(truncate_id(id, 2, 2), "66...e2");
    }

    #[test]
    fn test_truncate_id_short() {
        assert_eq!(truncate_id("short", 4, 4), "short");
        assert_eq!(truncate_id("abc", 4, 4), "abc");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.5), "$1,234,567.50");
        assert_eq!(format_currency(-40.0), "-$40.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_signed_currency() {
        assert_eq!(format_signed_currency(60.0), "+$60.00");
        assert_eq!(format_signed_currency(-12.5), "-$12.50");
    }

    #[test]
    fn test_format_percent_change() {
        assert_eq!(format_percent_change(1.254), "+1.25%");
        assert_eq!(format_percent_change(-0.4), "-0.40%");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(45230.5), "$45,230.50");
        assert_eq!(format_price(0.42), "$0.42");
        assert_eq!(format_price(0.00012345), "$0.00012345");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-06-04T10:00:00Z"), "Jun 04, 2024 10:00");
        assert_eq!(format_timestamp("not a date"), "not a date");
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 6, 4, 12, 0, 0).unwrap();
        assert_eq!(format_relative("2024-06-04T11:59:30Z", now), "just now");
        assert_eq!(format_relative("2024-06-04T11:55:00Z", now), "5 minutes ago");
        assert_eq!(format_relative("2024-06-04T11:00:00Z", now), "1 hour ago");
        assert_eq!(format_relative("2024-06-01T12:00:00Z", now), "3 days ago");
    }
}
