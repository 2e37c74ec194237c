//! Display formatting for sizes and dates.

use chrono::{DateTime, NaiveDateTime};

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable size, base 1024, at most two decimals
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Server timestamp as `YYYY-MM-DD HH:MM`; unknown shapes pass through
pub fn format_date(raw: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(OUT).to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_288_490_189), "1.2 GB");
        assert_eq!(format_file_size(5 * 1024u64.pow(4)), "5 TB");
    }

    #[test]
    fn test_two_decimal_rounding() {
        // 1234 / 1024 = 1.20507...
        assert_eq!(format_file_size(1234), "1.21 KB");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-01T10:05:09.000Z"), "2024-03-01 10:05");
        assert_eq!(format_date("2024-03-01 10:05:09"), "2024-03-01 10:05");
        assert_eq!(format_date("2024-03-01T10:05:09.123"), "2024-03-01 10:05");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
