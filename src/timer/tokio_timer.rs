use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::Timer;

/// Timer backed by tokio sleeps. Fired tokens arrive on the receiver returned
/// by [`TokioTimer::new`]. Must be used from within a tokio runtime.
pub struct TokioTimer<K> {
    sender: mpsc::UnboundedSender<K>,
    armed: Vec<(K, JoinHandle<()>)>,
}

impl<K> TokioTimer<K>
where
    K: Clone + PartialEq + Send + 'static,
{
    pub fn new() -> (Self, mpsc::UnboundedReceiver<K>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let timer = Self {
            sender,
            armed: Vec::new(),
        };
        (timer, receiver)
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn armed(&self) -> usize {
        self.armed.iter().filter(|(_, handle)| !handle.is_finished()).count()
    }
}

impl<K> Timer<K> for TokioTimer<K>
where
    K: Clone + PartialEq + Send + 'static,
{
    fn schedule(&mut self, delay: Duration, token: K) {
        self.armed.retain(|(_, handle)| !handle.is_finished());
        let sender = self.sender.clone();
        let fired = token.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may be gone during shutdown.
            let _ = sender.send(fired);
        });
        self.armed.push((token, handle));
    }

    fn cancel(&mut self, token: &K) {
        self.armed.retain(|(armed, handle)| {
            if armed == token {
                handle.abort();
                false
            } else {
                true
            }
        });
    }
}

impl<K> Drop for TokioTimer<K> {
    fn drop(&mut self) {
        for (_, handle) in &self.armed {
            handle.abort();
        }
    }
}
