use std::time::Duration;

/// Human-friendly duration for test timings and run summaries.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_millis(1) {
        "0ms".to_string()
    } else if d < Duration::from_secs(1) {
        format!("{}ms", d.as_millis())
    } else if d < Duration::from_secs(60) {
        // truncated to tenths so 59.95s stays below the minute bucket
        let tenths = d.as_millis() / 100;
        format!("{}.{}s", tenths / 10, tenths % 10)
    } else {
        let secs = d.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// `current - previous` as a signed number
pub fn signed_delta(current: usize, previous: usize) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |d| -d)
    }
}

/// ` (+3)` / ` (-2)`, or nothing for zero
pub fn format_delta(delta: i64) -> Option<String> {
    match delta {
        0 => None,
        d if d > 0 => Some(format!(" (+{})", d)),
        d => Some(format!(" ({})", d)),
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
