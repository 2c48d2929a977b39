//! Text widgets

use crate::core::{next_widget_id, Widget, WidgetId};
use crate::render::{Element, Node};

/// Text display widget
pub struct Text {
    id: WidgetId,
    tag: &'static str,
    class: Option<String>,
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: next_widget_id(),
            tag: "span",
            class: None,
            content: content.into(),
        }
    }

    /// Paragraph (`<p>`)
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self { tag: "p", ..Self::new(content) }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

impl Widget for Text {
    fn id(&self) -> WidgetId { self.id }

    fn render(&self) -> Node {
        Element::new(self.tag)
            .class(self.class.clone().unwrap_or_default())
            .text(self.content.as_str())
            .into()
    }
}

/// Heading variants
pub struct H1(Text);
pub struct H2(Text);

impl H1 {
    pub fn new(content: impl Into<String>) -> Self {
        Self(Text { tag: "h1", ..Text::new(content) })
    }
}

impl H2 {
    pub fn new(content: impl Into<String>) -> Self {
        Self(Text { tag: "h2", ..Text::new(content) })
    }
}

impl Widget for H1 {
    fn id(&self) -> WidgetId { self.0.id() }
    fn render(&self) -> Node { self.0.render() }
}

impl Widget for H2 {
    fn id(&self) -> WidgetId { self.0.id() }
    fn render(&self) -> Node { self.0.render() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::to_html;

    #[test]
    fn test_text_variants() {
        assert_eq!(to_html(&Text::new("Min: 0").render()), "<span>Min: 0</span>");
        assert_eq!(
            to_html(&Text::paragraph("Step size: 5").class("info-text").render()),
            r#"<p class="info-text">Step size: 5</p>"#
        );
        assert_eq!(to_html(&H1::new("Tally").render()), "<h1>Tally</h1>");
        assert_eq!(to_html(&H2::new("Interactive Counter").render()), "<h2>Interactive Counter</h2>");
    }
}
