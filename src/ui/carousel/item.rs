//! Default carousel item model and its renderer.

use serde::{Deserialize, Serialize};

use crate::dom::markup::{escape_attribute, escape_text};
use crate::view::{Renderer, ViewError, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl CarouselItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            image_url: None,
            link: None,
        }
    }
}

impl ViewModel for CarouselItem {}

/// Renders a [`CarouselItem`] as a `div.carousel-item` card.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemRenderer;

impl Renderer<CarouselItem> for ItemRenderer {
    fn render_item(&self, item: &CarouselItem) -> Result<String, ViewError> {
        if item.title.trim().is_empty() {
            return Err(ViewError::Render("carousel item has an empty title".to_string()));
        }

        let mut out = String::from(r#"<div class="carousel-item">"#);
        if let Some(url) = &item.image_url {
            out.push_str(&format!(r#"<img src="{}" alt="{}">"#, escape_attribute(url), escape_attribute(&item.title)));
        }
        let title = escape_text(&item.title);
        match &item.link {
            Some(link) => out.push_str(&format!(r#"<h3><a href="{}">{}</a></h3>"#, escape_attribute(link), title)),
            None => out.push_str(&format!("<h3>{title}</h3>")),
        }
        if let Some(body) = &item.body {
            out.push_str(&format!("<p>{}</p>", escape_text(body)));
        }
        out.push_str("</div>");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_single_root_card() {
        let item = CarouselItem {
            title: "Spring <sale>".into(),
            body: Some("Up to 50% off".into()),
            image_url: Some("/img/spring.png".into()),
            link: None,
        };
        let markup = ItemRenderer.render_item(&item).unwrap();
        assert_eq!(
            markup,
            r#"<div class="carousel-item"><img src="/img/spring.png" alt="Spring &lt;sale>"><h3>Spring &lt;sale&gt;</h3><p>Up to 50% off</p></div>"#
        );
    }

    #[test]
    fn empty_title_is_a_render_error() {
        let err = ItemRenderer.render_item(&CarouselItem::titled("  ")).unwrap_err();
        assert!(matches!(err, ViewError::Render(_)));
    }
}
