//! # Command Sink
//!
//! Outbound orders for the host engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │   Unit A    │─────>│   Command   │─────>│    Host     │
//! │   Unit B    │─────>│   Channel   │      │ (next tick) │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Proxies append, the host drains at its tick boundary. Once a command is
//! in the channel it cannot be withdrawn. Commands from one proxy arrive in
//! the order they were issued; a multi-command order is appended as one
//! contiguous batch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use tether_shared::Command;

/// Bounded command channel between proxies and the host.
///
/// Pre-allocates a bounded channel so a stalled host cannot grow memory
/// without limit.
pub struct CommandChannel {
    sender: Sender<Command>,
    receiver: Receiver<Command>,
    stats: Arc<SinkStats>,
    append: Arc<Mutex<()>>,
}

impl CommandChannel {
    /// Creates a new channel.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum commands in flight before new ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            stats: Arc::new(SinkStats::default()),
            append: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            sender: self.sender.clone(),
            stats: Arc::clone(&self.stats),
            append: Arc::clone(&self.append),
        }
    }

    /// Creates the host-side queue handle.
    #[must_use]
    pub fn queue(&self) -> CommandQueue {
        CommandQueue {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a new pair of sender and queue.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (CommandSender, CommandQueue) {
        let channel = Self::new(capacity);
        (channel.sender(), channel.queue())
    }
}

/// Counters for the command sink.
#[derive(Debug, Default)]
pub struct SinkStats {
    enqueued: AtomicU64,
    dropped: AtomicU64,
}

impl SinkStats {
    /// Commands accepted into the channel.
    #[must_use]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Commands dropped because the channel was full or the host was gone.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Handle for appending commands.
#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<Command>,
    stats: Arc<SinkStats>,
    append: Arc<Mutex<()>>,
}

impl CommandSender {
    /// Appends a single command (non-blocking).
    ///
    /// Returns `false` if the command was dropped.
    #[inline]
    pub fn enqueue(&self, command: Command) -> bool {
        let _guard = self.append.lock();
        self.push(command)
    }

    /// Appends several commands with no other producer's commands between
    /// them.
    ///
    /// All or nothing: if the channel lacks room for the whole batch, every
    /// command in it is dropped and counted, and `false` is returned.
    pub fn enqueue_batch(&self, commands: &[Command]) -> bool {
        let _guard = self.append.lock();
        // Every producer holds this guard to append; room can only grow until release
        let room = self
            .sender
            .capacity()
            .map_or(usize::MAX, |capacity| capacity.saturating_sub(self.sender.len()));
        if commands.len() > room {
            let count = u64::try_from(commands.len()).unwrap_or(u64::MAX);
            self.stats.dropped.fetch_add(count, Ordering::Relaxed);
            tracing::warn!(
                batch = commands.len(),
                room,
                "command sink full, dropping batch"
            );
            return false;
        }
        commands.iter().all(|command| self.push(*command))
    }

    /// Returns the sink counters.
    #[must_use]
    pub fn stats(&self) -> &SinkStats {
        &self.stats
    }

    fn push(&self, command: Command) -> bool {
        match self.sender.try_send(command) {
            Ok(()) => {
                self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(
                    kind = ?command.kind(),
                    unit = command.unit().0,
                    "command enqueued"
                );
                true
            }
            Err(TrySendError::Full(_)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(kind = ?command.kind(), "command sink full, dropping command");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    kind = ?command.kind(),
                    "command sink disconnected, dropping command"
                );
                false
            }
        }
    }
}

/// Host-side handle for consuming commands.
#[derive(Clone)]
pub struct CommandQueue {
    receiver: Receiver<Command>,
}

impl CommandQueue {
    /// Takes every pending command (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(self.receiver.len());
        while let Ok(command) = self.receiver.try_recv() {
            commands.push(command);
        }
        commands
    }

    /// Takes one command, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<Command> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending commands.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending commands.
    #[inline]
    #[must_use]
    pub fn has_commands(&self) -> bool {
        !self.receiver.is_empty()
    }
}
