//! Container widget

use crate::core::{next_widget_id, BoxedWidget, Widget, WidgetId};
use crate::render::{Element, Node};

enum Child {
    Widget(BoxedWidget),
    Node(Node),
}

/// Generic block container (`<div>`) with a class list
pub struct Container {
    id: WidgetId,
    classes: Vec<String>,
    children: Vec<Child>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            id: next_widget_id(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(Child::Widget(Box::new(child)));
        self
    }

    /// Append an already rendered subtree
    pub fn node(mut self, node: impl Into<Node>) -> Self {
        self.children.push(Child::Node(node.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn id(&self) -> WidgetId { self.id }

    fn render(&self) -> Node {
        Element::new("div")
            .classes(self.classes.iter().cloned())
            .children(self.children.iter().map(|child| match child {
                Child::Widget(widget) => widget.render(),
                Child::Node(node) => node.clone(),
            }))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::to_html;
    use crate::widgets::Text;

    #[test]
    fn test_mixed_children_render_in_order() {
        let container = Container::new()
            .class("min-max-display")
            .child(Text::new("Min: None"))
            .node(Element::new("span").text("Max: None"));
        assert_eq!(container.len(), 2);
        assert_eq!(
            to_html(&container.render()),
            r#"<div class="min-max-display"><span>Min: None</span><span>Max: None</span></div>"#
        );
    }
}
