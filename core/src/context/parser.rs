use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Datelike, Duration as ChronoDuration, NaiveDateTime};

use crate::combat::CombatDetector;
use crate::combat_log::{CombatEvent, LogLine, Reader, ReaderError};
use crate::context::Clock;
use crate::tracker::Tracker;

/// Where the feeder takes event times from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Historical replay: times come from the line prefixes.
    LogTimestamps,
    /// Live tail: lines are stamped with the tracker's clock on arrival.
    Clock,
}

/// Feeds raw log lines into a tracker, deriving combat enter/leave from
/// inactivity since a combat log has no explicit combat markers.
///
/// In replay mode line timestamps are mapped onto monotonic instants anchored
/// at the first stamped line, so combat time reflects the log, not how fast
/// it was read.
#[derive(Debug)]
pub struct LogFeeder {
    detector: CombatDetector,
    time_source: TimeSource,
    year: i32,
    anchor: Option<(NaiveDateTime, Instant)>,
    last_timestamp: Option<NaiveDateTime>,
    /// Days added for midnight rollovers seen so far
    day_offset: i64,
    /// Years added for New Year rollovers seen so far
    year_offset: i32,
    last_at: Option<Instant>,
    lines: usize,
    events: usize,
}

impl LogFeeder {
    fn new(time_source: TimeSource, timeout_secs: i64, clock: &impl Clock) -> Self {
        Self {
            detector: CombatDetector::new(timeout_secs),
            time_source,
            year: clock.wall_now().year(),
            anchor: None,
            last_timestamp: None,
            day_offset: 0,
            year_offset: 0,
            last_at: None,
            lines: 0,
            events: 0,
        }
    }

    pub fn replay(timeout_secs: i64, clock: &impl Clock) -> Self {
        Self::new(TimeSource::LogTimestamps, timeout_secs, clock)
    }

    pub fn live(timeout_secs: i64, clock: &impl Clock) -> Self {
        Self::new(TimeSource::Clock, timeout_secs, clock)
    }

    pub fn time_source(&self) -> TimeSource {
        self.time_source
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn events(&self) -> usize {
        self.events
    }

    /// Process one raw line. Returns the event if the line classified.
    pub fn feed<C: Clock>(&mut self, tracker: &mut Tracker<C>, raw: &str) -> Option<CombatEvent> {
        self.lines += 1;
        let line = LogLine::parse(raw, self.year);
        let event = tracker.process_line(line.text)?;
        self.events += 1;

        let at = self.instant_for(line.timestamp, tracker.clock());
        self.detector.on_activity(tracker.combat_timer_mut(), at);
        Some(event)
    }

    /// Leave combat if the tracker's clock shows the timeout has elapsed.
    pub fn check_idle<C: Clock>(&mut self, tracker: &mut Tracker<C>) -> bool {
        let now = tracker.clock().now();
        self.detector.check_idle(tracker.combat_timer_mut(), now)
    }

    /// Close any combat interval still open at the last activity.
    pub fn finish<C: Clock>(&mut self, tracker: &mut Tracker<C>) {
        self.detector.finish(tracker.combat_timer_mut());
    }

    fn instant_for(&mut self, timestamp: Option<NaiveDateTime>, clock: &impl Clock) -> Instant {
        let at = match (self.time_source, timestamp) {
            (TimeSource::LogTimestamps, Some(ts)) => {
                let ts = self.roll_over(ts);
                let (anchor_ts, anchor_at) = *self.anchor.get_or_insert((ts, clock.now()));
                let offset = (ts - anchor_ts).to_std().unwrap_or_default();
                anchor_at + offset
            }
            // an unstamped line in a replay happens "at" the previous event
            (TimeSource::LogTimestamps, None) => self.last_at.unwrap_or_else(|| clock.now()),
            (TimeSource::Clock, _) => clock.now(),
        };
        let at = self.last_at.map_or(at, |last| last.max(at));
        self.last_at = Some(at);
        at
    }

    // The prefix carries no year, and lines are stamped with the year the
    // replay runs in. A jump back of more than a day means the log crossed New
    // Year; a jump back of more than half a day within the same date is taken
    // as crossing midnight.
    fn roll_over(&mut self, ts: NaiveDateTime) -> NaiveDateTime {
        let mut shifted = self.shift(ts);
        if let Some(last) = self.last_timestamp {
            let back = last - shifted;
            if back > ChronoDuration::days(1) {
                self.year_offset += 1;
                shifted = self.shift(ts);
            } else if back > ChronoDuration::hours(12) {
                self.day_offset += 1;
                shifted = self.shift(ts);
            }
        }
        self.last_timestamp = Some(shifted);
        shifted
    }

    fn shift(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let ts = ts.with_year(ts.year() + self.year_offset).unwrap_or(ts);
        ts + ChronoDuration::days(self.day_offset)
    }
}

/// Resolve a log file path, joining with `log_directory` if relative.
pub fn resolve_log_path(log_directory: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        log_directory.join(path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Parsing Helper
// ─────────────────────────────────────────────────────────────────────────────

/// Result of parsing a log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseResult {
    pub lines_count: usize,
    pub events_count: usize,
    pub elapsed_ms: u128,
    /// Byte offset of the end of the file, where tailing can resume
    pub end_pos: u64,
}

/// Replay an entire log file into the tracker.
pub fn parse_file<C: Clock>(
    tracker: &mut Tracker<C>,
    path: &Path,
    timeout_secs: i64,
) -> Result<ParseResult, ReaderError> {
    let timer = std::time::Instant::now();

    let reader = Reader::from(path.to_path_buf());
    let (lines, end_pos) = reader.read_log_file()?;

    let mut feeder = LogFeeder::replay(timeout_secs, tracker.clock());
    for line in &lines {
        feeder.feed(tracker, line);
    }
    feeder.finish(tracker);

    let result = ParseResult {
        lines_count: feeder.lines(),
        events_count: feeder.events(),
        elapsed_ms: timer.elapsed().as_millis(),
        end_pos,
    };
    tracing::info!(
        path = %path.display(),
        lines = result.lines_count,
        events = result.events_count,
        elapsed_ms = result.elapsed_ms as u64,
        "parsed log file"
    );
    Ok(result)
}
