use chrono::NaiveDateTime;
use memchr::memmem;

/// Separator between the timestamp prefix and the message in a combat log file.
const PREFIX_SEPARATOR: &[u8] = b"  ";

/// One line of a combat log file: `M/D HH:MM:SS.mmm  <message>`.
///
/// Lines without a recognizable prefix (e.g. pasted chat text) keep the whole
/// line as the message and carry no timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub timestamp: Option<NaiveDateTime>,
    pub text: &'a str,
}

impl<'a> LogLine<'a> {
    /// The log omits the year, so the caller supplies it.
    pub fn parse(line: &'a str, year: i32) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let untimed = LogLine {
            timestamp: None,
            text: line,
        };

        let Some(sep) = memmem::find(line.as_bytes(), PREFIX_SEPARATOR) else {
            return untimed;
        };
        let prefix = &line[..sep];
        if !prefix.starts_with(|c: char| c.is_ascii_digit()) {
            return untimed;
        }

        match parse_timestamp(prefix, year) {
            Some(timestamp) => LogLine {
                timestamp: Some(timestamp),
                text: line[sep + PREFIX_SEPARATOR.len()..].trim_start(),
            },
            None => untimed,
        }
    }
}

// parse M/D HH:MM:SS.mmm
fn parse_timestamp(prefix: &str, year: i32) -> Option<NaiveDateTime> {
    let stamped = format!("{year}/{prefix}");
    NaiveDateTime::parse_from_str(&stamped, "%Y/%m/%d %H:%M:%S%.f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parses_timestamped_line() {
        let line = LogLine::parse("10/18 21:03:11.123  You hit Training Dummy for 120.\r\n", 2006);
        let ts = line.timestamp.unwrap();

        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2006, 10, 18).unwrap());
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (21, 3, 11));
        assert_eq!(ts.nanosecond() / 1_000_000, 123);
        assert_eq!(line.text, "You hit Training Dummy for 120.");
    }

    #[test]
    fn single_digit_month_and_day() {
        let line = LogLine::parse("1/5 09:00:00.000  You miss Training Dummy.", 2006);
        assert_eq!(
            line.timestamp.map(|t| t.date()),
            NaiveDate::from_ymd_opt(2006, 1, 5)
        );
    }

    #[test]
    fn untimed_line_is_kept_whole() {
        let line = LogLine::parse("You hit Training Dummy for 120.", 2006);
        assert_eq!(line.timestamp, None);
        assert_eq!(line.text, "You hit Training Dummy for 120.");
    }

    #[test]
    fn malformed_prefix_is_kept_whole() {
        let raw = "99/99 25:00:00.000  You hit Training Dummy for 120.";
        let line = LogLine::parse(raw, 2006);
        assert_eq!(line.timestamp, None);
        assert_eq!(line.text, raw);
    }
}
