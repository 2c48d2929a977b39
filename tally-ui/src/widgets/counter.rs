//! Interactive counter widget
//!
//! A bounded, steppable integer with a pulse effect on button-driven
//! changes. The widget owns its [`CounterState`]; its [`CounterConfig`] is
//! read-only apart from the theme, which the page may overwrite.

use crate::core::{
    next_widget_id, Action, Color, Context, DirtyList, Event, Scheduler, State, Theme, TimerHandle,
    Widget, WidgetId,
};
use crate::error::{Result, UiError};
use crate::render::{Element, Node};
use crate::style::{
    AlignItems, Dimension, Display, EdgeInsets, FontWeight, JustifyContent, Keyframes, Shadow, Style,
    StyleSheet, TextAlign,
};
use crate::widgets::{Button, Container, NumberInput, Text, H2};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Smallest integer exactly representable as an IEEE double; the "no lower bound" sentinel
pub const MIN_SAFE_INTEGER: i64 = -(1 << 53) + 1;
/// Largest integer exactly representable as an IEEE double; the "no upper bound" sentinel
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;
/// How long the value display stays pulsed after a button-driven change
pub const PULSE_DURATION: Duration = Duration::from_millis(500);

/// Per-instance counter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    pub initial: i64,
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub theme: Theme,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            initial: 0,
            min: MIN_SAFE_INTEGER,
            max: MAX_SAFE_INTEGER,
            step: 1,
            theme: Theme::Blue,
        }
    }
}

impl CounterConfig {
    pub fn new(initial: i64) -> Self {
        Self { initial, ..Self::default() }
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Check `min <= initial <= max`.
    ///
    /// Advisory only: counters mount and run with inconsistent bounds.
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(UiError::InvalidConfig(format!(
                "min {} is greater than max {}",
                self.min, self.max
            )));
        }
        if self.initial < self.min || self.initial > self.max {
            return Err(UiError::InvalidConfig(format!(
                "initial {} is outside [{}, {}]",
                self.initial, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Mutable counter state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    pub count: i64,
    pub animating: bool,
}

/// Bounded, steppable counter widget
pub struct Counter {
    id: WidgetId,
    config: CounterConfig,
    state: State<CounterState>,
    /// Dirty list of the context the counter is attached to
    dirty: State<Option<DirtyList>>,
    pulse: Option<TimerHandle>,
}

impl Counter {
    /// `count` stays 0 until the counter is attached
    pub fn new(config: CounterConfig) -> Self {
        Self {
            id: next_widget_id(),
            config,
            state: State::new(CounterState::default()),
            dirty: State::new(None),
            pulse: None,
        }
    }

    /// Start tracking re-renders in `ctx` and set `count` to the initial value.
    /// Bounds are not validated. Attaching again moves tracking to the new
    /// context.
    pub fn attach(&mut self, ctx: &Context) {
        if self.dirty.with(Option::is_none) {
            let (id, dirty) = (self.id, self.dirty.clone());
            self.state.subscribe(move || mark_dirty(&dirty, id));
        }
        self.dirty.set(Some(ctx.dirty_list()));

        let initial = self.config.initial;
        self.state.update(|s| s.count = initial);
        debug!(widget = self.id, count = initial, "counter attached");
    }

    /// Step up unless that would pass `max`. Returns whether the value changed.
    pub fn increment(&mut self, scheduler: &mut Scheduler) -> bool {
        let (step, max) = (self.config.step, self.config.max);
        let next = self
            .state
            .with(|s| s.count.checked_add(step))
            .filter(|next| *next <= max);

        match next {
            Some(next) => {
                self.commit(next, scheduler);
                true
            }
            None => {
                debug!(widget = self.id, "increment refused at upper bound");
                false
            }
        }
    }

    /// Step down unless that would pass `min`. Returns whether the value changed.
    pub fn decrement(&mut self, scheduler: &mut Scheduler) -> bool {
        let (step, min) = (self.config.step, self.config.min);
        let next = self
            .state
            .with(|s| s.count.checked_sub(step))
            .filter(|next| *next >= min);

        match next {
            Some(next) => {
                self.commit(next, scheduler);
                true
            }
            None => {
                debug!(widget = self.id, "decrement refused at lower bound");
                false
            }
        }
    }

    /// Return to the initial value, unconditionally
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.commit(self.config.initial, scheduler);
    }

    /// Apply text from the numeric input. Out-of-range values clamp to the
    /// nearest bound; unparsable text is ignored. Never pulses.
    ///
    /// Returns the applied value.
    pub fn set_from_input(&mut self, raw: &str) -> Option<i64> {
        let Some(parsed) = parse_int(raw) else {
            debug!(widget = self.id, raw, "ignoring non-numeric input");
            return None;
        };

        let CounterConfig { min, max, .. } = self.config;
        // Kept as explicit comparisons: `Ord::clamp` panics when min > max.
        let value = if parsed >= min && parsed <= max {
            parsed
        } else if parsed < min {
            min
        } else {
            max
        };

        self.state.update(|s| s.count = value);
        debug!(widget = self.id, parsed, count = value, "counter set from input");
        Some(value)
    }

    /// Replace the visual theme; `count` is untouched
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
        mark_dirty(&self.dirty, self.id);
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    pub fn count(&self) -> i64 {
        self.state.with(|s| s.count)
    }

    pub fn is_animating(&self) -> bool {
        self.state.with(|s| s.animating)
    }

    /// Whether the decrement control is enabled
    pub fn can_decrement(&self) -> bool {
        self.count() > self.config.min
    }

    /// Whether the increment control is enabled
    pub fn can_increment(&self) -> bool {
        self.count() < self.config.max
    }

    /// Label for the lower bound: "None" at the sentinel
    pub fn min_label(&self) -> String {
        bound_label(self.config.min, MIN_SAFE_INTEGER)
    }

    /// Label for the upper bound: "None" at the sentinel
    pub fn max_label(&self) -> String {
        bound_label(self.config.max, MAX_SAFE_INTEGER)
    }

    fn commit(&mut self, count: i64, scheduler: &mut Scheduler) {
        self.state.update(|s| {
            s.count = count;
            s.animating = true;
        });
        debug!(widget = self.id, count, "counter changed");

        // Restart the pulse window so it always ends PULSE_DURATION after
        // the latest change.
        if let Some(previous) = self.pulse.take() {
            scheduler.cancel(previous);
        }
        let state = self.state.clone();
        self.pulse = Some(scheduler.schedule(PULSE_DURATION, move || {
            state.update(|s| s.animating = false);
        }));
    }
}

impl Widget for Counter {
    fn id(&self) -> WidgetId { self.id }

    fn render(&self) -> Node {
        let CounterState { count, animating } = self.state.get();
        let CounterConfig { min, max, step, theme, .. } = self.config;

        let value = Element::new("div")
            .class("value-display")
            .class(if animating { "value-animate" } else { "" })
            .text(count.to_string());

        let controls = Container::new()
            .class("controls")
            .child(Button::new("-").action(Action::Decrement).disabled(count <= min))
            .child(Button::new("Reset").action(Action::Reset))
            .child(Button::new("+").action(Action::Increment).disabled(count >= max));

        let input = Container::new()
            .class("counter-input")
            .child(NumberInput::new(count).range(min, max).step(step));

        let bounds = Container::new()
            .class("min-max-display")
            .child(Text::new(format!("Min: {}", self.min_label())))
            .child(Text::new(format!("Max: {}", self.max_label())));

        Element::new("div")
            .class("counter-container")
            .class(theme.class())
            .attr("data-widget", self.id)
            .child(H2::new("Interactive Counter").render())
            .child(value)
            .child(controls.render())
            .child(input.render())
            .child(bounds.render())
            .child(Text::paragraph(format!("Step size: {}", step)).class("info-text").render())
            .into()
    }

    fn on_event(&mut self, event: &Event, ctx: &mut Context) -> bool {
        match event {
            Event::Click { action: Action::Increment } => self.increment(&mut ctx.scheduler),
            Event::Click { action: Action::Decrement } => self.decrement(&mut ctx.scheduler),
            Event::Click { action: Action::Reset } => {
                self.reset(&mut ctx.scheduler);
                true
            }
            Event::Change { value } => self.set_from_input(value).is_some(),
        }
    }

    fn on_mount(&mut self, ctx: &mut Context) {
        self.attach(ctx);
    }
}

impl Counter {
    /// Stylesheet shared by every counter on a page
    pub fn stylesheet() -> StyleSheet {
        let mut sheet = StyleSheet::new().rule(
            ".counter-container",
            Style::new()
                .font_family("'Segoe UI', Tahoma, Geneva, Verdana, sans-serif")
                .background(Color::WHITE)
                .border_radius(12.0)
                .shadow(Shadow::new(0.0, 4.0, 20.0, Color::rgba(0, 0, 0, 0.1)))
                .padding(Dimension::Rem(2.0))
                .width(300.0)
                .text_align(TextAlign::Center)
                .transition("all 0.3s ease"),
        );

        for theme in Theme::ALL {
            let palette = theme.palette();
            sheet = sheet.rule(
                format!(".counter-container.{}", theme.class()),
                Style::new()
                    .prop("--primary-color", palette.primary.to_css())
                    .prop("--primary-hover", palette.primary_hover.to_css())
                    .prop("--value-color", palette.value.to_css()),
            );
        }

        sheet
            .rule(
                ".counter-container h2",
                Style::new().text_color("#333").font_weight(FontWeight::Light).margin_top(0),
            )
            .rule(
                ".value-display",
                Style::new()
                    .prop("position", "relative")
                    .font_size(Dimension::Rem(3.5))
                    .font_weight(FontWeight::Bold)
                    .text_color("var(--value-color)")
                    .margin((Dimension::Rem(1.5), Dimension::Px(0.0)))
                    .transition("all 0.2s ease")
                    .prop("user-select", "none"),
            )
            .rule(".value-animate", Style::new().prop("animation", "pulse 0.5s ease"))
            .keyframes(
                Keyframes::new("pulse")
                    .frame("0%", Style::new().transform("scale(1)"))
                    .frame("50%", Style::new().transform("scale(1.1)"))
                    .frame("100%", Style::new().transform("scale(1)")),
            )
            .rule(
                ".controls",
                Style::new()
                    .display(Display::Flex)
                    .justify_content(JustifyContent::Center)
                    .gap(Dimension::Rem(0.75)),
            )
            .rule(
                ".counter-container button",
                Style::new()
                    .background_color("var(--primary-color)")
                    .text_color("white")
                    .border_none()
                    .border_radius(8.0)
                    .padding(EdgeInsets::symmetric(Dimension::Rem(1.5), Dimension::Rem(0.75)))
                    .font_size(Dimension::Rem(1.2))
                    .cursor("pointer")
                    .transition("all 0.2s ease")
                    .display(Display::Flex)
                    .align_items(AlignItems::Center)
                    .justify_content(JustifyContent::Center),
            )
            .rule(
                ".counter-container button:hover",
                Style::new()
                    .background_color("var(--primary-hover)")
                    .transform("translateY(-2px)"),
            )
            .rule(".counter-container button:active", Style::new().transform("translateY(0)"))
            .rule(
                ".counter-input",
                Style::new()
                    .margin_top(Dimension::Rem(1.0))
                    .display(Display::Flex)
                    .justify_content(JustifyContent::Center)
                    .align_items(AlignItems::Center),
            )
            .rule(
                ".counter-container input",
                Style::new()
                    .width(80.0)
                    .text_align(TextAlign::Center)
                    .font_size(Dimension::Rem(1.1))
                    .padding(Dimension::Rem(0.5))
                    .border(1.0, Color::rgb(0xdd, 0xdd, 0xdd))
                    .border_radius(4.0),
            )
            .rule(
                ".info-text",
                Style::new()
                    .margin_top(Dimension::Rem(1.0))
                    .font_size(Dimension::Rem(0.85))
                    .text_color("#7f8c8d"),
            )
            .rule(
                ".min-max-display",
                Style::new()
                    .display(Display::Flex)
                    .justify_content(JustifyContent::SpaceBetween)
                    .margin_top(Dimension::Rem(0.5))
                    .font_size(Dimension::Rem(0.8))
                    .text_color("#95a5a6"),
            )
    }
}

fn bound_label(value: i64, sentinel: i64) -> String {
    if value == sentinel {
        "None".to_string()
    } else {
        value.to_string()
    }
}

/// Integer prefix parse with browser `parseInt(text, 10)` rules: leading
/// whitespace, optional sign, then as many decimal digits as are present.
/// Trailing characters are ignored. Digit runs beyond `i64` saturate.
fn mark_dirty(slot: &State<Option<DirtyList>>, id: WidgetId) {
    slot.with(|dirty| {
        if let Some(dirty) = dirty {
            dirty.mark(id);
        }
    });
}

pub fn parse_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let value = digits[..len].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    Some(value)
}
