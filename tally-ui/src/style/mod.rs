//! Styling system for Tally UI
//!
//! Styles are ordered CSS declaration lists assembled with builder methods
//! and grouped into stylesheets that the document injects into its head.

use crate::core::context::Color;

/// Ordered set of CSS declarations for one selector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw declaration; a repeated property replaces the earlier value
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        match self.declarations.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((name, value)),
        }
        self
    }

    /// Value of a declared property
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    // Builder methods
    pub fn width(self, w: impl Into<Dimension>) -> Self {
        self.prop("width", w.into().to_css())
    }

    pub fn min_height(self, h: impl Into<Dimension>) -> Self {
        self.prop("min-height", h.into().to_css())
    }

    pub fn max_width(self, w: impl Into<Dimension>) -> Self {
        self.prop("max-width", w.into().to_css())
    }

    pub fn display(self, display: Display) -> Self {
        self.prop("display", display.as_css())
    }

    pub fn flex_direction(self, dir: FlexDirection) -> Self {
        self.prop("flex-direction", dir.as_css())
    }

    pub fn flex_wrap(self, wrap: FlexWrap) -> Self {
        self.prop("flex-wrap", wrap.as_css())
    }

    pub fn justify_content(self, jc: JustifyContent) -> Self {
        self.prop("justify-content", jc.as_css())
    }

    pub fn align_items(self, ai: AlignItems) -> Self {
        self.prop("align-items", ai.as_css())
    }

    pub fn gap(self, gap: impl Into<Dimension>) -> Self {
        self.prop("gap", gap.into().to_css())
    }

    pub fn padding(self, p: impl Into<EdgeInsets>) -> Self {
        self.prop("padding", p.into().to_css())
    }

    pub fn margin(self, m: impl Into<EdgeInsets>) -> Self {
        self.prop("margin", m.into().to_css())
    }

    pub fn margin_top(self, m: impl Into<Dimension>) -> Self {
        self.prop("margin-top", m.into().to_css())
    }

    pub fn margin_bottom(self, m: impl Into<Dimension>) -> Self {
        self.prop("margin-bottom", m.into().to_css())
    }

    pub fn background(self, color: Color) -> Self {
        self.prop("background", color.to_css())
    }

    pub fn background_color(self, color: impl Into<String>) -> Self {
        self.prop("background-color", color)
    }

    pub fn border(self, width: f32, color: Color) -> Self {
        self.prop("border", format!("{} solid {}", Dimension::Px(width).to_css(), color.to_css()))
    }

    pub fn border_none(self) -> Self {
        self.prop("border", "none")
    }

    pub fn border_radius(self, radius: impl Into<Dimension>) -> Self {
        self.prop("border-radius", radius.into().to_css())
    }

    pub fn font_family(self, family: &str) -> Self {
        self.prop("font-family", family)
    }

    pub fn font_size(self, size: impl Into<Dimension>) -> Self {
        self.prop("font-size", size.into().to_css())
    }

    pub fn font_weight(self, weight: FontWeight) -> Self {
        self.prop("font-weight", weight.as_css())
    }

    pub fn text_color(self, color: impl Into<String>) -> Self {
        self.prop("color", color)
    }

    pub fn text_align(self, align: TextAlign) -> Self {
        self.prop("text-align", align.as_css())
    }

    pub fn shadow(self, shadow: Shadow) -> Self {
        self.prop("box-shadow", shadow.to_css())
    }

    pub fn transition(self, transition: &str) -> Self {
        self.prop("transition", transition)
    }

    pub fn transform(self, transform: &str) -> Self {
        self.prop("transform", transform)
    }

    pub fn cursor(self, cursor: &str) -> Self {
        self.prop("cursor", cursor)
    }

    pub fn to_css(&self, selector: &str) -> String {
        let mut out = format!("{} {{\n", selector);
        for (name, value) in &self.declarations {
            out.push_str(&format!("  {}: {};\n", name, value));
        }
        out.push_str("}\n");
        out
    }

    fn inline_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `@keyframes` block
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    name: String,
    frames: Vec<(String, Style)>,
}

impl Keyframes {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), frames: Vec::new() }
    }

    pub fn frame(mut self, offset: impl Into<String>, style: Style) -> Self {
        self.frames.push((offset.into(), style));
        self
    }

    pub fn to_css(&self) -> String {
        let mut out = format!("@keyframes {} {{\n", self.name);
        for (offset, style) in &self.frames {
            out.push_str(&format!("  {} {{ {} }}\n", offset, style.inline_css()));
        }
        out.push_str("}\n");
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Rule { selector: String, style: Style },
    Keyframes(Keyframes),
}

/// Ordered collection of rules and keyframes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    items: Vec<Item>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, selector: impl Into<String>, style: Style) -> Self {
        self.items.push(Item::Rule { selector: selector.into(), style });
        self
    }

    pub fn keyframes(mut self, keyframes: Keyframes) -> Self {
        self.items.push(Item::Keyframes(keyframes));
        self
    }

    /// Style of the first rule with exactly this selector
    pub fn find(&self, selector: &str) -> Option<&Style> {
        self.items.iter().find_map(|item| match item {
            Item::Rule { selector: s, style } if s == selector => Some(style),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_css(&self) -> String {
        let blocks: Vec<String> = self
            .items
            .iter()
            .map(|item| match item {
                Item::Rule { selector, style } => style.to_css(selector),
                Item::Keyframes(keyframes) => keyframes.to_css(),
            })
            .collect();
        blocks.join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Px(f32),
    Rem(f32),
    Vh(f32),
}

impl Dimension {
    pub fn to_css(&self) -> String {
        match *self {
            Dimension::Px(v) if v == 0.0 => "0".to_string(),
            Dimension::Px(v) => format!("{}px", v),
            Dimension::Rem(v) => format!("{}rem", v),
            Dimension::Vh(v) => format!("{}vh", v),
        }
    }
}

impl From<f32> for Dimension {
    fn from(v: f32) -> Self {
        Dimension::Px(v)
    }
}

impl From<i32> for Dimension {
    fn from(v: i32) -> Self {
        Dimension::Px(v as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    Flex,
    None,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::Flex => "flex",
            Display::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

impl FlexDirection {
    pub fn as_css(&self) -> &'static str {
        match self {
            FlexDirection::Row => "row",
            FlexDirection::Column => "column",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JustifyContent {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
}

impl JustifyContent {
    pub fn as_css(&self) -> &'static str {
        match self {
            JustifyContent::Start => "flex-start",
            JustifyContent::End => "flex-end",
            JustifyContent::Center => "center",
            JustifyContent::SpaceBetween => "space-between",
            JustifyContent::SpaceAround => "space-around",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignItems {
    Start,
    End,
    Center,
    Stretch,
}

impl AlignItems {
    pub fn as_css(&self) -> &'static str {
        match self {
            AlignItems::Start => "flex-start",
            AlignItems::End => "flex-end",
            AlignItems::Center => "center",
            AlignItems::Stretch => "stretch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexWrap {
    NoWrap,
    Wrap,
}

impl FlexWrap {
    pub fn as_css(&self) -> &'static str {
        match self {
            FlexWrap::NoWrap => "nowrap",
            FlexWrap::Wrap => "wrap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Thin,
    Light,
    Normal,
    Medium,
    Bold,
    Black,
}

impl FontWeight {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Thin => "100",
            FontWeight::Light => "300",
            FontWeight::Normal => "400",
            FontWeight::Medium => "500",
            FontWeight::Bold => "700",
            FontWeight::Black => "900",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInsets {
    pub top: Dimension,
    pub right: Dimension,
    pub bottom: Dimension,
    pub left: Dimension,
}

impl EdgeInsets {
    pub fn zero() -> Self {
        Self::all(Dimension::Px(0.0))
    }

    pub fn all(v: impl Into<Dimension>) -> Self {
        let v = v.into();
        Self { top: v, right: v, bottom: v, left: v }
    }

    pub fn symmetric(horizontal: impl Into<Dimension>, vertical: impl Into<Dimension>) -> Self {
        let (h, v) = (horizontal.into(), vertical.into());
        Self { top: v, right: h, bottom: v, left: h }
    }

    /// Shortest CSS shorthand for the four sides
    pub fn to_css(&self) -> String {
        let [t, r, b, l] = [self.top, self.right, self.bottom, self.left].map(|d| d.to_css());
        if t == r && r == b && b == l {
            t
        } else if t == b && r == l {
            format!("{} {}", t, r)
        } else {
            format!("{} {} {} {}", t, r, b, l)
        }
    }
}

impl From<f32> for EdgeInsets {
    fn from(v: f32) -> Self {
        Self::all(v)
    }
}

impl From<Dimension> for EdgeInsets {
    fn from(v: Dimension) -> Self {
        Self::all(v)
    }
}

impl From<(Dimension, Dimension)> for EdgeInsets {
    fn from((v, h): (Dimension, Dimension)) -> Self {
        Self::symmetric(h, v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset_x: f32, offset_y: f32, blur: f32, color: Color) -> Self {
        Self { offset_x, offset_y, blur, color }
    }

    pub fn to_css(&self) -> String {
        format!(
            "{} {} {} {}",
            Dimension::Px(self.offset_x).to_css(),
            Dimension::Px(self.offset_y).to_css(),
            Dimension::Px(self.blur).to_css(),
            self.color.to_css()
        )
    }
}
