//! Page context shared with widgets: colors, themes, timers and the dirty list

use crate::core::{Scheduler, WidgetId};
use crate::error::UiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

/// Context passed to widgets while mounting and handling events
#[derive(Debug, Default)]
pub struct Context {
    /// Timer queue for delayed work
    pub scheduler: Scheduler,
    /// Widgets that need re-rendering
    dirty: DirtyList,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a widget as needing re-render
    pub fn mark_dirty(&self, id: WidgetId) {
        self.dirty.mark(id);
    }

    /// Get dirty widgets and clear the list
    pub fn take_dirty(&self) -> Vec<WidgetId> {
        self.dirty.take()
    }

    /// Shared handle to the dirty list, for state subscriptions and timers
    pub fn dirty_list(&self) -> DirtyList {
        self.dirty.clone()
    }
}

/// Ordered, de-duplicated set of widgets awaiting re-render
#[derive(Debug, Clone, Default)]
pub struct DirtyList {
    ids: Arc<Mutex<Vec<WidgetId>>>,
}

impl DirtyList {
    pub fn mark(&self, id: WidgetId) {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    pub fn take(&self) -> Vec<WidgetId> {
        std::mem::take(&mut *self.ids.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_empty(&self) -> bool {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

/// Visual palette selection for a counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blue,
    Green,
    Purple,
}

/// Colors a theme resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub primary_hover: Color,
    pub value: Color,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Blue, Theme::Green, Theme::Purple];

    /// Tag used in markup (`data-theme`) and config files
    pub fn tag(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Purple => "purple",
        }
    }

    /// CSS class carrying the theme's custom properties
    pub fn class(&self) -> String {
        format!("theme-{}", self.tag())
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Blue => "Blue",
            Theme::Green => "Green",
            Theme::Purple => "Purple",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Blue => Palette {
                primary: Color::rgb(0x34, 0x98, 0xdb),
                primary_hover: Color::rgb(0x29, 0x80, 0xb9),
                value: Color::rgb(0x2c, 0x3e, 0x50),
            },
            Theme::Green => Palette {
                primary: Color::rgb(0x2e, 0xcc, 0x71),
                primary_hover: Color::rgb(0x27, 0xae, 0x60),
                value: Color::rgb(0x1e, 0x3f, 0x29),
            },
            Theme::Purple => Palette {
                primary: Color::rgb(0x9b, 0x59, 0xb6),
                primary_hover: Color::rgb(0x8e, 0x44, 0xad),
                value: Color::rgb(0x4a, 0x23, 0x5a),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Theme {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| UiError::UnknownTheme(tag.to_string()))
    }
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `alpha` is clamped to 0.0..=1.0
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    /// CSS notation: `#rrggbb` when opaque, `rgba(...)` otherwise
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = f32::from(self.a) / 255.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, (alpha * 100.0).round() / 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_tag() {
        assert_eq!("green".parse::<Theme>().unwrap(), Theme::Green);
        assert_eq!(" Purple ".parse::<Theme>().unwrap(), Theme::Purple);
        assert!(matches!("red".parse::<Theme>(), Err(UiError::UnknownTheme(tag)) if tag == "red"));
    }

    #[test]
    fn test_theme_class_and_default() {
        assert_eq!(Theme::default(), Theme::Blue);
        assert_eq!(Theme::Purple.class(), "theme-purple");
        assert_eq!(Theme::Green.to_string(), "green");
    }

    #[test]
    fn test_palette_css() {
        let blue = Theme::Blue.palette();
        assert_eq!(blue.primary.to_css(), "#3498db");
        assert_eq!(blue.primary_hover.to_css(), "#2980b9");
        assert_eq!(Theme::Purple.palette().value.to_css(), "#4a235a");
    }

    #[test]
    fn test_translucent_color_css() {
        assert_eq!(Color::rgba(0, 0, 0, 0.1).to_css(), "rgba(0, 0, 0, 0.1)");
        assert_eq!(Color::rgba(1, 2, 3, 4.0), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_dirty_list_dedups_in_order() {
        let ctx = Context::new();
        let shared = ctx.dirty_list();
        ctx.mark_dirty(3);
        shared.mark(1);
        ctx.mark_dirty(3);

        assert_eq!(ctx.take_dirty(), vec![3, 1]);
        assert!(shared.is_empty());
    }
}
