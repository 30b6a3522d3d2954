//! Single-shot timer service injected into widgets.
//!
//! Widgets schedule tokens instead of closures. Whoever drives the widget
//! hands fired tokens back to it (e.g. `Carousel::on_timer`), so tests can run
//! on [`VirtualTimer`] and applications on [`TokioTimer`].

mod tokio_timer;
mod virtual_clock;

use std::time::Duration;

pub use tokio_timer::TokioTimer;
pub use virtual_clock::VirtualTimer;

pub trait Timer<K> {
    /// Arms a single-shot timer that fires `token` after `delay`.
    fn schedule(&mut self, delay: Duration, token: K);

    /// Disarms every pending timer for `token`. Cancelling nothing is fine.
    fn cancel(&mut self, token: &K);
}
