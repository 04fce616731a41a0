//! Concurrent discovery of candidate files.
//!
//! A [`Feeder`] walks a directory tree on a background thread and streams
//! every regular file accepted by all of its matchers through a bounded
//! queue. The consumer sees the stream as a [`Feed`] iterator.
//!
//! Matchers see each path relative to the walked root, so directories above
//! the root never take part in selection.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::config::DEFAULT_QUEUE_CAPACITY;
use crate::matcher::MatcherBox;

/// Errors that prevent file discovery from starting.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The root directory cannot be read.
    #[error("cannot read directory {path}: {source}")]
    Discovery {
        /// The root that was requested.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The walker thread could not be started.
    #[error("failed to start file discovery: {0}")]
    Spawn(std::io::Error),
}

/// Streams candidate files from a directory tree.
///
/// A path is fed if and only if every matcher accepts its root-relative
/// form. A feeder with no matchers feeds every regular file.
pub struct Feeder {
    matchers: Arc<[MatcherBox]>,
    capacity: usize,
}

impl Feeder {
    /// Creates a feeder from an ordered set of matchers.
    #[must_use]
    pub fn new(matchers: Vec<MatcherBox>) -> Self {
        Self {
            matchers: matchers.into(),
            capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Sets how many paths may be queued ahead of the consumer.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Starts walking `root` and returns the stream of accepted files.
    ///
    /// Paths are absolute and arrive in lexicographic walk order. Each call
    /// starts a fresh walk. Unreadable subdirectories are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Discovery`] if `root` itself cannot be read.
    pub fn feed(&self, root: &Path) -> Result<Feed, FeedError> {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| FeedError::Discovery {
                    path: root.to_path_buf(),
                    source: e,
                })?
                .join(root)
        };
        // Drops `.` components so fed paths read `/p/a.go`, not `/p/./a.go`.
        let root: PathBuf = root.components().collect();

        std::fs::read_dir(&root).map_err(|e| FeedError::Discovery {
            path: root.clone(),
            source: e,
        })?;

        let (sender, receiver) = mpsc::sync_channel(self.capacity);
        let cancelled = Arc::new(AtomicBool::new(false));
        let producer = Producer {
            root,
            matchers: Arc::clone(&self.matchers),
            sender,
            cancelled: Arc::clone(&cancelled),
        };

        let handle = thread::Builder::new()
            .name("lingo-feeder".into())
            .spawn(move || producer.run())
            .map_err(FeedError::Spawn)?;

        Ok(Feed {
            receiver: Some(receiver),
            cancelled,
            handle: Some(handle),
        })
    }
}

fn accepts(matchers: &[MatcherBox], path: &Path) -> bool {
    matchers.iter().all(|m| m.matches(path))
}

struct Producer {
    root: PathBuf,
    matchers: Arc<[MatcherBox]>,
    sender: SyncSender<PathBuf>,
    cancelled: Arc<AtomicBool>,
}

impl Producer {
    fn run(self) {
        debug!("Walking {}", self.root.display());

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            if self.cancelled.load(Ordering::Acquire) {
                debug!("Feed cancelled, stopping walk");
                return;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if !accepts(&self.matchers, relative) {
                trace!("Not a candidate: {}", path.display());
                continue;
            }

            // Blocks while the queue is full; fails once the consumer is gone.
            if self.cancelled.load(Ordering::Acquire) || self.sender.send(path).is_err() {
                debug!("Consumer gone, stopping walk");
                return;
            }
        }
    }
}

/// Stream of candidate files produced by [`Feeder::feed`].
///
/// Dropping the feed (or calling [`Feed::cancel`]) stops the walker thread.
pub struct Feed {
    receiver: Option<Receiver<PathBuf>>,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Feed {
    /// Stops the walk and waits for the walker thread to exit.
    ///
    /// Paths not yet received are discarded.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        // Dropping the receiver unblocks a producer waiting on a full queue.
        self.receiver = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("File walker thread panicked");
            }
        }
    }
}

impl Iterator for Feed {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        self.receiver.as_ref()?.recv().ok()
    }
}

impl Drop for Feed {
    fn drop(&mut self) {
        self.cancel();
    }
}
