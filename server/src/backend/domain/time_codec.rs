//! Conversion between the two textual time forms used by daily reports.
//!
//! Reports are stored with 12-hour display times ("2:30 PM") while the edit
//! form works with 24-hour times ("14:30"). Neither direction depends on the
//! wall clock or locale, and neither ever fails: input that cannot be read is
//! handed back unchanged.
//!
//! `to_24_hour(to_12_hour(t)) == t` holds for every `t` in `00:00..=23:59`.
//! The opposite direction is not exact for text without an AM/PM suffix,
//! which passes through `to_24_hour` untouched.

/// Convert "h:mm AM" / "h:mm PM" into "HH:mm".
///
/// Only hours 1 to 12 are read; any other hour is passed through.
pub fn to_24_hour(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut parts = text.split(' ');
    let time = parts.next().unwrap_or_default();
    let is_pm = match parts.next().map(str::to_ascii_uppercase).as_deref() {
        Some("PM") => true,
        Some("AM") => false,
        _ => return text.to_string(),
    };

    let Some((hour_text, minute)) = time.split_once(':') else {
        return text.to_string();
    };
    let hour = match hour_text.trim().parse::<u32>() {
        Ok(hour @ 1..=12) => hour,
        _ => return text.to_string(),
    };

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    format!("{:02}:{}", hour, minute)
}

/// Convert "HH:mm" into "h:mm AM" / "h:mm PM".
///
/// Hour 0 and hour 12 both display as "12". The minute text is not re-padded.
/// Hours above 23 are passed through.
pub fn to_12_hour(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let Some((hour_text, minute)) = text.split_once(':') else {
        return text.to_string();
    };
    let hour = match hour_text.trim().parse::<u32>() {
        Ok(hour @ 0..=23) => hour,
        _ => return text.to_string(),
    };

    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{} {}", display_hour, minute, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_12_hour_known_values() {
        assert_eq!(to_12_hour("00:00"), "12:00 AM");
        assert_eq!(to_12_hour("12:00"), "12:00 PM");
        assert_eq!(to_12_hour("13:05"), "1:05 PM");
        assert_eq!(to_12_hour("09:30"), "9:30 AM");
        assert_eq!(to_12_hour("23:59"), "11:59 PM");
    }

    #[test]
    fn test_to_24_hour_known_values() {
        assert_eq!(to_24_hour("2:30 PM"), "14:30");
        assert_eq!(to_24_hour("12:00 AM"), "00:00");
        assert_eq!(to_24_hour("12:15 PM"), "12:15");
        assert_eq!(to_24_hour("7:45 am"), "07:45");
        assert_eq!(to_24_hour("11:05 pm"), "23:05");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(to_24_hour(""), "");
        assert_eq!(to_12_hour(""), "");
    }

    #[test]
    fn test_to_24_hour_passes_through_without_suffix() {
        assert_eq!(to_24_hour("14:30"), "14:30");
        assert_eq!(to_24_hour("9:05"), "9:05");
        assert_eq!(to_24_hour("2:30 XM"), "2:30 XM");
    }

    #[test]
    fn test_malformed_input_degrades_to_pass_through() {
        assert_eq!(to_24_hour("noon PM"), "noon PM");
        assert_eq!(to_24_hour("ab:cd AM"), "ab:cd AM");
        assert_eq!(to_12_hour("later"), "later");
        assert_eq!(to_12_hour("xx:15"), "xx:15");
    }

    #[test]
    fn test_out_of_range_hours_pass_through() {
        assert_eq!(to_24_hour("4294967295:00 PM"), "4294967295:00 PM");
        assert_eq!(to_24_hour("13:00 PM"), "13:00 PM");
        assert_eq!(to_24_hour("0:30 AM"), "0:30 AM");
        assert_eq!(to_12_hour("24:00"), "24:00");
        assert_eq!(to_12_hour("4294967295:00"), "4294967295:00");
    }

    #[test]
    fn test_minute_text_is_not_repadded() {
        assert_eq!(to_12_hour("14:5"), "2:5 PM");
        assert_eq!(to_24_hour("2:5 PM"), "14:5");
    }

    #[test]
    fn test_round_trip_every_minute_of_the_day() {
        for hour in 0..24 {
            for minute in 0..60 {
                let time = format!("{:02}:{:02}", hour, minute);
                assert_eq!(to_24_hour(&to_12_hour(&time)), time, "round trip failed for {}", time);
            }
        }
    }

    #[test]
    fn test_reverse_round_trip_is_not_exact_for_pass_through() {
        // Already-24-hour text survives to_24_hour but comes back in display form.
        assert_eq!(to_12_hour(&to_24_hour("14:30")), "2:30 PM");
    }
}
