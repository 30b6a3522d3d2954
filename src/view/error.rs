use thiserror::Error;

use crate::dom::MarkupError;
use crate::resource::Verb;

/// Errors raised by view rendering, item lookup and api tables.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("No container element with id '{id}'")]
    RootNotFound { id: String },

    /// `render_single` was handed a sequence; sequences go through `render_list`.
    #[error("render_single expects a single model but got a sequence ({type_name}); use render_list")]
    SequenceModel { type_name: &'static str },

    #[error("Template produced no nodes")]
    EmptyMarkup,

    #[error("Invalid template markup: {0}")]
    Markup(#[from] MarkupError),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("No view item with id '{id}'")]
    ItemNotFound { id: String },

    #[error("No api endpoint named '{name}'")]
    UnknownEndpoint { name: String },

    #[error("Endpoint '{name}' uses {verb} and cannot be called with {given}")]
    ArgumentMismatch {
        name: String,
        verb: Verb,
        given: &'static str,
    },
}
