use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::{EventLog, EventLogConfig, EventLogError, Result, TelemetryEvent};

/// Newline-delimited JSON log guarded by an exclusive lock on a sibling file.
///
/// Every append runs the whole critical section (create dir, lock, open in
/// append mode, single write, flush, unlock) on the blocking thread pool, so
/// a slow disk never stalls the async runtime. The lock is an OS advisory
/// lock, which makes appends safe across worker processes that share the
/// same data directory, not just across tasks of one process.
#[derive(Debug, Clone)]
pub struct FileEventLog {
    config: Arc<EventLogConfig>,
}

impl FileEventLog {
    /// Creates a log for the given location. Nothing is touched on disk yet.
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &EventLogConfig {
        &self.config
    }

    /// Creates the data directory if it is missing.
    pub fn ensure_data_dir(&self) -> Result<()> {
        create_data_dir(&self.config)
    }

    /// Appends an event on the current thread, blocking until the lock is held.
    pub fn append_blocking(&self, event: &TelemetryEvent) -> Result<()> {
        let line = event.to_json_line()?;
        append_line(&self.config, line.as_bytes())
    }
}

#[async_trait]
impl EventLog for FileEventLog {
    #[tracing::instrument(
        skip(self, event),
        fields(session_id = %event.session_id, event_type = %event.event_type)
    )]
    async fn append(&self, event: &TelemetryEvent) -> Result<()> {
        let line = event.to_json_line()?;
        let config = Arc::clone(&self.config);
        let started = Instant::now();

        // The worker runs to completion even if this future is dropped, so
        // the lock guard is always released by the thread that took it.
        let result = tokio::task::spawn_blocking(move || append_line(&config, line.as_bytes()))
            .await
            .unwrap_or_else(|err| Err(EventLogError::Worker(err.to_string())));

        match &result {
            Ok(()) => {
                metrics::counter!("event_log_appends_total").increment(1);
                metrics::histogram!("event_log_append_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                tracing::debug!(path = %self.config.data_file().display(), "event appended");
            }
            Err(err) => {
                metrics::counter!("event_log_append_failures_total").increment(1);
                tracing::warn!(error = %err, "event append failed");
            }
        }

        result
    }
}

fn create_data_dir(config: &EventLogConfig) -> Result<()> {
    fs::create_dir_all(config.data_dir()).map_err(|source| EventLogError::CreateDir {
        path: config.data_dir().to_path_buf(),
        source,
    })
}

fn open_lock_file(config: &EventLogConfig) -> Result<File> {
    let path = config.lock_file();
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .map_err(|source| EventLogError::Lock { path, source })
}

fn append_line(config: &EventLogConfig, line: &[u8]) -> Result<()> {
    create_data_dir(config)?;

    let mut lock = fd_lock::RwLock::new(open_lock_file(config)?);
    let _guard = lock.write().map_err(|source| EventLogError::Lock {
        path: config.lock_file(),
        source,
    })?;

    let path = config.data_file();
    let mut file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(source) => return Err(EventLogError::Open { path, source }),
    };

    let prev_len = match file.metadata() {
        Ok(metadata) => metadata.len(),
        Err(source) => return Err(EventLogError::Write { path, source }),
    };

    // One write call per record; the lock keeps other writers out until the
    // whole line is down. A short write is cut back so the log never keeps
    // a fragment for the next record to join onto.
    if let Err(source) = file.write_all(line).and_then(|()| file.flush()) {
        if let Err(err) = file.set_len(prev_len) {
            tracing::error!(
                path = %path.display(),
                len = prev_len,
                error = %err,
                "failed to roll back partial write"
            );
        }
        return Err(EventLogError::Write { path, source });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;

    fn setup() -> (FileEventLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = FileEventLog::new(EventLogConfig::new(temp_dir.path().join("data")));
        (log, temp_dir)
    }

    fn event(session_id: &str) -> TelemetryEvent {
        TelemetryEvent::new(session_id, "unit_test", Utc::now())
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_append_creates_directory_and_line() {
        let (log, _temp) = setup();
        assert!(!log.config().data_dir().exists());

        log.append_blocking(&event("s1")).unwrap();

        let lines = read_lines(&log.config().data_file());
        assert_eq!(lines.len(), 1);
        let parsed: TelemetryEvent = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed.session_id, "s1");
        assert!(log.config().lock_file().exists());
    }

    #[test]
    fn test_append_never_truncates() {
        let (log, _temp) = setup();
        log.append_blocking(&event("s1")).unwrap();
        log.append_blocking(&event("s2")).unwrap();
        log.append_blocking(&event("s3")).unwrap();

        let raw = fs::read_to_string(log.config().data_file()).unwrap();
        assert!(raw.ends_with('\n'));
        let sessions: Vec<String> = raw
            .lines()
            .map(|l| serde_json::from_str::<TelemetryEvent>(l).unwrap().session_id)
            .collect();
        assert_eq!(sessions, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_lock_file_holds_no_data() {
        let (log, _temp) = setup();
        log.append_blocking(&event("s1")).unwrap();
        assert_eq!(fs::metadata(log.config().lock_file()).unwrap().len(), 0);
    }

    #[test]
    fn test_append_waits_for_lock_holder() {
        let (log, _temp) = setup();
        log.ensure_data_dir().unwrap();

        let mut held = fd_lock::RwLock::new(open_lock_file(log.config()).unwrap());
        let guard = held.write().unwrap();

        let (tx, rx) = mpsc::channel();
        let writer = log.clone();
        let handle = thread::spawn(move || {
            writer.append_blocking(&event("blocked")).unwrap();
            tx.send(()).unwrap();
        });

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        assert!(!log.config().data_file().exists());

        drop(guard);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        handle.join().unwrap();

        assert_eq!(read_lines(&log.config().data_file()).len(), 1);
    }

    #[test]
    fn test_unusable_data_dir_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, b"occupied").unwrap();

        let log = FileEventLog::new(EventLogConfig::new(&blocker));
        let err = log.append_blocking(&event("s1")).unwrap_err();

        assert!(matches!(err, EventLogError::CreateDir { .. }));
        assert_eq!(fs::read(&blocker).unwrap(), b"occupied");
    }

    #[tokio::test]
    async fn test_async_append_writes_line() {
        let (log, _temp) = setup();
        log.append(&event("async")).await.unwrap();

        let lines = read_lines(&log.config().data_file());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"session_id\":\"async\""));
    }

    #[tokio::test]
    async fn test_async_append_surfaces_io_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"").unwrap();

        let log = FileEventLog::new(EventLogConfig::new(blocker.join("nested")));
        let result = log.append(&event("s1")).await;

        assert!(matches!(result, Err(EventLogError::CreateDir { .. })));
    }
}
