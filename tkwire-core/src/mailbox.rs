// tkwire-core/src/mailbox.rs
use crossbeam::channel::{Receiver, Sender, TryRecvError, unbounded};

use crate::Tk;

/// Work sent from another thread to run on the event-loop thread
pub type Job = Box<dyn FnOnce(&Tk) + Send>;

#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("event loop is gone")]
    Closed,
}

/// Sending side of the loop mailbox. `Send + Clone`, so worker threads can
/// hand results back to the widget tree without touching it directly.
#[derive(Clone)]
pub struct Poster {
    tx: Sender<Job>,
}

impl Poster {
    pub fn post(&self, job: impl FnOnce(&Tk) + Send + 'static) -> Result<(), PostError> {
        self.tx.send(Box::new(job)).map_err(|_| PostError::Closed)
    }
}

/// Receiving side, owned by the `Tk` context
pub(crate) struct Mailbox {
    tx: Sender<Job>,
    rx: Receiver<Job>,
}

impl Mailbox {
    pub(crate) fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub(crate) fn poster(&self) -> Poster {
        Poster {
            tx: self.tx.clone(),
        }
    }

    /// Next queued job, if any. Never blocks.
    pub(crate) fn next(&self) -> Option<Job> {
        match self.rx.try_recv() {
            Ok(job) => Some(job),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
