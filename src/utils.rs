use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Human-readable size with binary units and one decimal digit.
/// Divides by 1024 up the unit ladder; anything past zettabytes is "Yi".
pub fn sizeof_fmt(num: i64) -> String {
    let mut num = num as f64;
    for unit in ["", "K", "M", "G", "T", "P", "E", "Z"] {
        if num.abs() < 1024.0 {
            return format!("{num:3.1}{unit}B");
        }
        num /= 1024.0;
    }
    format!("{num:.1}YiB")
}

/// Local-time timestamp, day-month-year order, 24-hour clock.
pub fn format_timestamp(t: SystemTime) -> String {
    DateTime::<Local>::from(t)
        .format("%d-%m-%Y %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_below_1024_have_no_unit_prefix() {
        assert_eq!(sizeof_fmt(0), "0.0B");
        assert_eq!(sizeof_fmt(512), "512.0B");
        assert_eq!(sizeof_fmt(1023), "1023.0B");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(sizeof_fmt(1024), "1.0KB");
        assert_eq!(sizeof_fmt(1048576), "1.0MB");
        assert_eq!(sizeof_fmt(1024 * 1024 * 1024), "1.0GB");
    }

    #[test]
    fn fractional_and_negative_values() {
        assert_eq!(sizeof_fmt(1536), "1.5KB");
        assert_eq!(sizeof_fmt(-512), "-512.0B");
        assert_eq!(sizeof_fmt(-1048576), "-1.0MB");
    }

    #[test]
    fn timestamp_shape() {
        let s = format_timestamp(SystemTime::now());
        let re = regex::Regex::new(r"^\d{2}-\d{2}-\d{4} \d{2}:\d{2}:\d{2}$").unwrap();
        assert!(re.is_match(&s), "unexpected timestamp format: {s}");
    }
}
