//! Button widgets

use crate::core::{next_widget_id, Action, Theme, Widget, WidgetId};
use crate::render::{Element, Node};

/// Standard button widget
pub struct Button {
    id: WidgetId,
    label: String,
    classes: Vec<String>,
    data: Vec<(String, String)>,
    disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: next_widget_id(),
            label: label.into(),
            classes: Vec::new(),
            data: Vec::new(),
            disabled: false,
        }
    }

    /// Widget action announced through `data-action`
    pub fn action(self, action: Action) -> Self {
        self.data("action", action.as_str())
    }

    /// Adds a `data-<key>` attribute
    pub fn data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.push((format!("data-{}", key), value.into()));
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Widget for Button {
    fn id(&self) -> WidgetId { self.id }

    fn render(&self) -> Node {
        let element = Element::new("button").classes(self.classes.iter().cloned());
        self.data
            .iter()
            .fold(element, |element, (name, value)| element.attr(name, value))
            .flag("disabled", self.disabled)
            .text(self.label.as_str())
            .into()
    }
}

/// Page-level theme switcher button (`theme-btn <tag>` with `data-theme`)
pub struct ThemeButton {
    id: WidgetId,
    theme: Theme,
}

impl ThemeButton {
    pub fn new(theme: Theme) -> Self {
        Self { id: next_widget_id(), theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl Widget for ThemeButton {
    fn id(&self) -> WidgetId { self.id }

    fn render(&self) -> Node {
        Button::new(format!("{} Theme", self.theme.label()))
            .class("theme-btn")
            .class(self.theme.tag())
            .data("theme", self.theme.tag())
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::to_html;

    #[test]
    fn test_action_button_markup() {
        let html = to_html(&Button::new("+").action(Action::Increment).disabled(true).render());
        assert_eq!(html, r#"<button data-action="increment" disabled>+</button>"#);
    }

    #[test]
    fn test_theme_button_markup() {
        let html = to_html(&ThemeButton::new(Theme::Green).render());
        assert_eq!(
            html,
            r#"<button class="theme-btn green" data-theme="green">Green Theme</button>"#
        );
    }
}
