//! Process termination that drains buffered output first.

use log::{debug, warn};
use std::io::Write;

/// Lifecycle of a [`Shutdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    Draining,
    Exited,
}

/// Flushes every registered stream before handing the exit status to the
/// termination primitive.
///
/// Only the first exit request is honoured; later requests are ignored so
/// the first status is never lost.
///
/// # Example
/// ```
/// use kiln::shutdown::{Shutdown, ShutdownState};
///
/// let mut shutdown = Shutdown::new(|code| assert_eq!(code, 0));
/// shutdown.register(Vec::new());
/// shutdown.exit(0);
/// assert_eq!(shutdown.state(), ShutdownState::Exited);
/// ```
pub struct Shutdown {
    state: ShutdownState,
    streams: Vec<Box<dyn Write>>,
    terminate: Box<dyn FnMut(i32)>,
}

impl Shutdown {
    /// `terminate` is invoked once, after every stream is drained.
    pub fn new<F>(terminate: F) -> Self
    where
        F: FnMut(i32) + 'static,
    {
        Self {
            state: ShutdownState::Running,
            streams: Vec::new(),
            terminate: Box::new(terminate),
        }
    }

    /// Adds a stream to drain on exit.
    pub fn register<W: Write + 'static>(&mut self, stream: W) {
        self.streams.push(Box::new(stream));
    }

    pub fn state(&self) -> ShutdownState {
        self.state
    }

    /// Drains all streams and terminates with `code`.
    pub fn exit(&mut self, code: i32) {
        if self.state != ShutdownState::Running {
            debug!("Ignoring exit({}) while {:?}", code, self.state);
            return;
        }

        self.state = ShutdownState::Draining;
        debug!("Draining {} output streams before exit({})", self.streams.len(), code);
        log::logger().flush();

        for stream in self.streams.iter_mut() {
            // A failed flush still completes the drain of that stream.
            if let Err(e) = stream.flush() {
                warn!("Failed to flush output stream: {}", e);
            }
        }

        self.state = ShutdownState::Exited;
        (self.terminate)(code);
    }
}
