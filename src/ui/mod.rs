//! Concrete widgets built on [`View`](crate::view::View).

pub mod calendar;
pub mod carousel;
pub mod mvi;
