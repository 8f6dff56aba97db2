use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::RwLock;
use tokio::time::{Duration, sleep};

use super::ReaderError;
use crate::context::{LogFeeder, SystemClock};
use crate::tracker::Tracker;

const TAIL_SLEEP_DURATION: Duration = Duration::from_millis(100);

/// Shared handle to a live tracker, written to by the tail task.
pub type TrackerHandle = Arc<RwLock<Tracker<SystemClock>>>;

pub struct Reader {
    path: PathBuf,
}

impl Reader {
    pub fn from(file_path: PathBuf) -> Self {
        Reader { path: file_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line of the file. Returns the lines and the byte offset of
    /// the end of the file, where tailing can pick up.
    pub fn read_log_file(&self) -> Result<(Vec<String>, u64), ReaderError> {
        let file = fs::File::open(&self.path).map_err(|source| ReaderError::OpenFile {
            path: self.path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| ReaderError::ReadFile {
                path: self.path.clone(),
                source,
            })?
            .len();
        if len == 0 {
            return Ok((Vec::new(), 0));
        }

        // SAFETY: the map is read-only and dropped before returning; a log
        // being appended to only grows past the mapped length.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ReaderError::MemoryMap {
            path: self.path.clone(),
            source,
        })?;
        let bytes = mmap.as_ref();
        let end_pos = bytes.len() as u64;

        let mut lines = Vec::new();
        let mut start = 0;
        for end in memchr_iter(b'\n', bytes) {
            if end > start {
                lines.push(decode_line(&bytes[start..end]));
            }
            start = end + 1;
        }
        if start < bytes.len() {
            lines.push(decode_line(&bytes[start..]));
        }

        Ok((lines, end_pos))
    }

    /// Follow the file from byte `pos`, feeding each complete line to the
    /// tracker. Combat ends after `timeout_secs` without a combat event.
    pub async fn tail_log_file(
        self,
        pos: u64,
        handle: TrackerHandle,
        timeout_secs: i64,
    ) -> Result<(), ReaderError> {
        let file = File::open(&self.path)
            .await
            .map_err(|source| ReaderError::OpenFile {
                path: self.path.clone(),
                source,
            })?;
        let mut reader = BufReader::new(file);
        reader
            .seek(SeekFrom::Start(pos))
            .await
            .map_err(|source| ReaderError::Seek {
                path: self.path.clone(),
                source,
            })?;

        let mut feeder = {
            let tracker = handle.read().await;
            LogFeeder::live(timeout_secs, tracker.clock())
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    if feeder.check_idle(&mut *handle.write().await) {
                        tracing::debug!(path = %self.path.display(), "combat timed out");
                    }
                    sleep(TAIL_SLEEP_DURATION).await;
                }
                Ok(_) => {
                    // Only process complete lines, a partial one is appended to
                    // on the next read
                    if buf.ends_with(b"\n") {
                        let line = decode_line(&buf);
                        feeder.feed(&mut *handle.write().await, &line);
                        buf.clear();
                    }
                }
                Err(source) => {
                    return Err(ReaderError::ReadFile {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let line = String::from_utf8_lossy(bytes);
    line.trim_end_matches(['\r', '\n']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_all_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "10/18 21:03:11.123  You hit Training Dummy for 120.\r\n\
             \r\n\
             10/18 21:03:12.500  You miss Training Dummy.\n\
             You crit Training Dummy for 240."
        )
        .unwrap();

        let reader = Reader::from(file.path().to_path_buf());
        let (lines, end_pos) = reader.read_log_file().unwrap();

        assert_eq!(
            lines,
            vec![
                "10/18 21:03:11.123  You hit Training Dummy for 120.",
                "",
                "10/18 21:03:12.500  You miss Training Dummy.",
                "You crit Training Dummy for 240.",
            ]
        );
        assert_eq!(end_pos, file.as_file().metadata().unwrap().len());
    }

    #[test]
    fn empty_file_has_no_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let reader = Reader::from(file.path().to_path_buf());
        let (lines, end_pos) = reader.read_log_file().unwrap();
        assert!(lines.is_empty());
        assert_eq!(end_pos, 0);
    }

    #[test]
    fn missing_file_is_open_error() {
        let reader = Reader::from(PathBuf::from("/nonexistent/WoWCombatLog.txt"));
        assert!(matches!(
            reader.read_log_file(),
            Err(ReaderError::OpenFile { .. })
        ));
    }
}
