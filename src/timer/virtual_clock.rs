use std::time::Duration;

use super::Timer;

/// Deterministic timer driven by explicit [`advance`](VirtualTimer::advance) calls.
#[derive(Debug)]
pub struct VirtualTimer<K> {
    now: Duration,
    sequence: u64,
    pending: Vec<Pending<K>>,
}

#[derive(Debug)]
struct Pending<K> {
    deadline: Duration,
    sequence: u64,
    token: K,
}

impl<K> Default for VirtualTimer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> VirtualTimer<K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            sequence: 0,
            pending: Vec::new(),
        }
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.deadline.saturating_sub(self.now))
            .min()
    }

    /// Moves time forward and returns the tokens whose deadline passed,
    /// earliest first. Timers with equal deadlines fire in scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<K> {
        self.now += by;
        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.deadline <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.deadline, p.sequence));
        due.into_iter().map(|p| p.token).collect()
    }
}

impl<K: PartialEq> Timer<K> for VirtualTimer<K> {
    fn schedule(&mut self, delay: Duration, token: K) {
        self.sequence += 1;
        self.pending.push(Pending {
            deadline: self.now + delay,
            sequence: self.sequence,
            token,
        });
    }

    fn cancel(&mut self, token: &K) {
        self.pending.retain(|p| p.token != *token);
    }
}
