//! Render capability and model classification.

use super::error::ViewError;

/// Turns a model into markup with exactly one root node.
///
/// Multi-root markup is tolerated: the view logs an error and keeps only the
/// first node. Errors returned here propagate to the caller of the render
/// operation that triggered them.
pub trait Renderer<M: ?Sized> {
    fn render_item(&self, model: &M) -> Result<String, ViewError>;
}

impl<M, F> Renderer<M> for F
where
    M: ?Sized,
    F: Fn(&M) -> Result<String, ViewError>,
{
    fn render_item(&self, model: &M) -> Result<String, ViewError> {
        self(model)
    }
}

/// Distinguishes single models from sequences of models.
///
/// Single-item rendering refuses sequences so the list and single paths are
/// never mixed up. Implement this with the default for plain model types.
pub trait ViewModel {
    fn is_sequence(&self) -> bool {
        false
    }
}

impl<T> ViewModel for Vec<T> {
    fn is_sequence(&self) -> bool {
        true
    }
}

impl<T> ViewModel for [T] {
    fn is_sequence(&self) -> bool {
        true
    }
}

impl<T, const N: usize> ViewModel for [T; N] {
    fn is_sequence(&self) -> bool {
        true
    }
}

impl<T: ViewModel + ?Sized> ViewModel for &T {
    fn is_sequence(&self) -> bool {
        (**self).is_sequence()
    }
}

impl ViewModel for serde_json::Value {
    fn is_sequence(&self) -> bool {
        self.is_array()
    }
}

impl ViewModel for str {}
impl ViewModel for String {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sequences_are_detected() {
        assert!(vec![1, 2].is_sequence());
        assert!([1, 2, 3].is_sequence());
        assert!(json!([{"a": 1}]).is_sequence());
        assert!(!json!({"a": 1}).is_sequence());
        assert!(!"text".is_sequence());
    }

    #[test]
    fn closures_are_renderers() {
        let renderer = |name: &String| -> Result<String, ViewError> { Ok(format!("<p>{name}</p>")) };
        assert_eq!(renderer.render_item(&"x".to_string()).unwrap(), "<p>x</p>");
    }
}
