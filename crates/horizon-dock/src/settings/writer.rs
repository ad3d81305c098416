//! Background settings writes.
//!
//! Frame-end saves hand the rendered document to a dedicated thread so the
//! frame loop never waits on the disk. Writes that queue up while the
//! thread is busy are coalesced: only the newest text for each path is
//! written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, SendError, Sender, bounded, unbounded};
use horizon_dock_core::{PerfSpan, logging::span_names, logging::targets};

use super::atomic_write;

const THREAD_NAME: &str = "horizon-dock-settings";

enum WriterTask {
    Write { path: PathBuf, text: String },
    Flush(Sender<()>),
}

/// Owns the settings writer thread.
///
/// Dropping the writer finishes every queued write before returning.
pub struct SettingsWriter {
    sender: Option<Sender<WriterTask>>,
    handle: Option<JoinHandle<()>>,
    pending: Arc<AtomicUsize>,
}

impl std::fmt::Debug for SettingsWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsWriter")
            .field("running", &self.sender.is_some())
            .field("pending", &self.pending_writes())
            .finish()
    }
}

impl Default for SettingsWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsWriter {
    /// Start the writer thread. If the thread cannot be spawned, writes
    /// happen on the caller's thread instead.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        let pending = Arc::new(AtomicUsize::new(0));
        let thread_pending = pending.clone();

        let spawned = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || writer_loop(receiver, thread_pending));

        match spawned {
            Ok(handle) => Self {
                sender: Some(sender),
                handle: Some(handle),
                pending,
            },
            Err(err) => {
                tracing::warn!(target: targets::SETTINGS, error = %err, "cannot start settings writer, saving on the frame thread");
                Self {
                    sender: None,
                    handle: None,
                    pending,
                }
            }
        }
    }

    /// Queue `text` to be written to `path`.
    pub fn submit(&self, path: PathBuf, text: String) {
        let task = WriterTask::Write { path, text };
        let task = match &self.sender {
            Some(sender) => {
                self.pending.fetch_add(1, Ordering::AcqRel);
                match sender.send(task) {
                    Ok(()) => return,
                    Err(SendError(task)) => {
                        self.pending.fetch_sub(1, Ordering::AcqRel);
                        task
                    }
                }
            }
            None => task,
        };
        if let WriterTask::Write { path, text } = task {
            write_logged(&path, &text);
        }
    }

    /// Writes queued but not yet on disk.
    pub fn pending_writes(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Block until every write queued so far is on disk.
    pub fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (ack, done) = bounded(1);
        if sender.send(WriterTask::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }
}

impl Drop for SettingsWriter {
    fn drop(&mut self) {
        // Closing the channel ends the loop once the queue is drained.
        self.sender.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::error!(target: targets::SETTINGS, "settings writer thread panicked");
        }
    }
}

fn writer_loop(receiver: Receiver<WriterTask>, pending: Arc<AtomicUsize>) {
    while let Ok(first) = receiver.recv() {
        let mut latest: BTreeMap<PathBuf, String> = BTreeMap::new();
        let mut acks = Vec::new();
        let mut received = 0;

        for task in std::iter::once(first).chain(receiver.try_iter()) {
            match task {
                WriterTask::Write { path, text } => {
                    received += 1;
                    latest.insert(path, text);
                }
                WriterTask::Flush(ack) => acks.push(ack),
            }
        }

        if received > latest.len() {
            tracing::debug!(target: targets::SETTINGS, queued = received, written = latest.len(), "coalesced settings writes");
        }
        for (path, text) in &latest {
            write_logged(path, text);
        }
        pending.fetch_sub(received, Ordering::AcqRel);
        for ack in acks {
            let _ = ack.send(());
        }
    }
}

fn write_logged(path: &Path, text: &str) {
    let _span = PerfSpan::new(span_names::SETTINGS_IO);
    match atomic_write(path, text.as_bytes()) {
        Ok(()) => tracing::info!(target: targets::SETTINGS, path = %path.display(), "settings saved"),
        Err(err) => tracing::error!(target: targets::SETTINGS, error = %err, "cannot save settings"),
    }
}
