pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else if secs < 3600.0 {
        let mins = (secs / 60.0) as u64;
        let rem = (secs % 60.0) as u64;
        format!("{}m {}s", mins, rem)
    } else {
        let hours = (secs / 3600.0) as u64;
        let mins = ((secs % 3600.0) / 60.0) as u64;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(4.25), "4.2s");
        assert_eq!(format_duration(75.0), "1m 15s");
        assert_eq!(format_duration(3725.0), "1h 2m");
    }
}
