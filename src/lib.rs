//! Retained-document widgets: a rendering and event-binding base, a rotating
//! carousel and a month calendar fed by a JSON events endpoint.

pub mod config;
pub mod dom;
pub mod logging;
pub mod resource;
pub mod timer;
pub mod ui;
pub mod view;
