//! Background discovery of kernel projects.
//!
//! [`DirectoryScanner`] runs one walk over the configured roots on a
//! dedicated thread and hands qualifying projects back over a channel. The
//! owner drains whatever has arrived so far without blocking; records
//! accumulate across drains.
//!
//! # Completeness
//!
//! A drain only reports what the worker has found *so far*. Callers that need
//! every project must keep draining until [`DirectoryScanner::state`] reports
//! [`ScanState::Complete`], or block with [`DirectoryScanner::wait`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use uv_kernels::scanner::{DirectoryScanner, ScanOptions, ScanState};
//!
//! let dir = tempfile::TempDir::new().unwrap();
//! let mut scanner = DirectoryScanner::new(ScanOptions::new(vec![dir.path().to_path_buf()]));
//! scanner.start();
//! assert!(scanner.wait(Duration::from_secs(10)));
//! assert_eq!(scanner.state(), ScanState::Complete);
//! assert!(scanner.drain().is_empty());
//! ```

pub mod cancel;
pub mod walk;

pub use cancel::CancellationToken;
pub use walk::{walk_roots, ScanOptions, IGNORED_DIRS};

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::detection::ProjectRecord;

/// Lifecycle of a scanner's current walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No walk has been started.
    NotStarted,
    /// The worker is still walking.
    Running,
    /// The worker finished, was cancelled, or could not be started.
    Complete,
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Running => write!(f, "running"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Walks root directories in the background, once per scan cycle.
pub struct DirectoryScanner {
    options: Arc<ScanOptions>,
    state: ScanState,
    receiver: Option<Receiver<ProjectRecord>>,
    records: Vec<ProjectRecord>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<usize>>,
}

impl DirectoryScanner {
    /// Create an idle scanner.
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options: Arc::new(options),
            state: ScanState::NotStarted,
            receiver: None,
            records: Vec::new(),
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// The options this scanner walks with.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Whether the current walk has finished.
    pub fn is_complete(&self) -> bool {
        self.state == ScanState::Complete
    }

    /// Start the background walk. Does nothing once a walk has been started.
    pub fn start(&mut self) {
        if self.state != ScanState::NotStarted {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let options = Arc::clone(&self.options);
        let cancel = self.cancel.clone();

        let spawned = thread::Builder::new()
            .name("uv-kernels-scan".to_string())
            .spawn(move || {
                info!("Started kernel project scan of {} root(s)", options.roots.len());
                let found = walk_roots(&options, &cancel, |record| tx.send(record).is_ok());
                info!("Kernel project scan finished, {} project(s) found", found);
                found
            });

        match spawned {
            Ok(handle) => {
                self.receiver = Some(rx);
                self.handle = Some(handle);
                self.state = ScanState::Running;
            }
            Err(e) => {
                warn!("Could not start scan thread: {}", e);
                self.state = ScanState::Complete;
            }
        }
    }

    /// Move every queued record into the accumulation without blocking.
    ///
    /// Returns all records accumulated since the walk started, in discovery
    /// order.
    pub fn drain(&mut self) -> &[ProjectRecord] {
        if let Some(rx) = &self.receiver {
            loop {
                match rx.try_recv() {
                    Ok(record) => self.records.push(record),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.finish();
                        break;
                    }
                }
            }
        }
        &self.records
    }

    /// Block until the walk completes or `timeout` elapses.
    ///
    /// Records received while waiting are accumulated. Returns `true` if the
    /// walk is complete. A scanner that was never started returns `false`.
    ///
    /// A timeout too large to represent as a deadline waits without bound.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);

        loop {
            let Some(rx) = &self.receiver else {
                return self.is_complete();
            };

            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    rx.recv_timeout(remaining)
                }
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(record) => self.records.push(record),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    self.finish();
                    return true;
                }
            }
        }
    }

    /// Ask the running walk to stop. Already accumulated records are kept.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Discard all results and start a fresh walk.
    pub fn rescan(&mut self) {
        self.cancel();
        self.receiver = None;
        // The old worker exits on its own once it sees the cancellation.
        self.handle = None;
        self.records.clear();
        self.cancel = CancellationToken::new();
        self.state = ScanState::NotStarted;
        debug!("Restarting kernel project scan");
        self.start();
    }

    /// Cancel the walk and wait for the worker thread to exit.
    pub fn shutdown(&mut self) {
        self.cancel();
        self.receiver = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Scan thread panicked");
            }
        }
        if self.state == ScanState::Running {
            self.state = ScanState::Complete;
        }
    }

    fn finish(&mut self) {
        self.receiver = None;
        self.state = ScanState::Complete;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Scan thread panicked");
            }
        }
    }
}

impl Drop for DirectoryScanner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for DirectoryScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryScanner")
            .field("roots", &self.options.roots)
            .field("state", &self.state)
            .field("records", &self.records.len())
            .finish()
    }
}
