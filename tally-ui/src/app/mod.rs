//! Page orchestrator
//!
//! Builds the document shell, mounts counters and fans theme changes out
//! to every mounted counter. Counters never talk to each other; the page
//! is the only thing that reaches across them.

use crate::core::{Color, Context, Event, Theme, Widget, WidgetId};
use crate::error::{Result, UiError};
use crate::render::{to_html, Document, Element, Node};
use crate::style::{
    AlignItems, Dimension, Display, EdgeInsets, FlexDirection, FlexWrap, FontWeight, JustifyContent, Shadow,
    Style, StyleSheet, TextAlign,
};
use crate::widgets::{Container, Counter, CounterConfig, ThemeButton, H1};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TITLE: &str = "Tally";
pub const DEFAULT_HEADING: &str = "Framework Design - 2025";

/// Events the page accepts from its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    /// Event for one mounted widget
    Widget { widget: WidgetId, event: Event },
    /// A theme-selector button was clicked; `theme` is its `data-theme` tag
    SelectTheme { theme: String },
}

/// Re-rendered markup for one widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub widget: WidgetId,
    pub html: String,
}

/// The three counters of the demo page
pub fn demo_configs() -> Vec<CounterConfig> {
    vec![
        CounterConfig::new(5).range(0, 10).step(1).theme(Theme::Blue),
        CounterConfig::new(50).range(0, 100).step(5).theme(Theme::Green),
        CounterConfig::new(0).range(-10, 10).step(2).theme(Theme::Purple),
    ]
}

/// A page of counters with a theme switcher
pub struct Page {
    heading: String,
    footer: Option<String>,
    document: Document,
    counters: Vec<Counter>,
    context: Context,
}

impl Page {
    /// Empty page; the global stylesheet is injected here, once
    pub fn new(title: impl Into<String>) -> Self {
        let mut document = Document::new(title);
        document.inject_style("page", page_stylesheet());

        Self {
            heading: DEFAULT_HEADING.to_string(),
            footer: None,
            document,
            counters: Vec::new(),
            context: Context::new(),
        }
    }

    /// Page with the three demo counters mounted
    pub fn demo() -> Self {
        let mut page = Self::new(DEFAULT_TITLE);
        for config in demo_configs() {
            page.mount(config);
        }
        page
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Closing line below the counters
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn title(&self) -> &str {
        self.document.title()
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Attach a new counter. Inconsistent bounds are logged, not rejected.
    pub fn mount(&mut self, config: CounterConfig) -> WidgetId {
        if let Err(err) = config.validate() {
            warn!(%err, "mounting counter with inconsistent bounds");
        }

        self.document.inject_style("counter", Counter::stylesheet());

        let mut counter = Counter::new(config);
        counter.on_mount(&mut self.context);
        let id = counter.id();
        info!(widget = id, theme = %counter.theme(), count = counter.count(), "counter mounted");
        self.counters.push(counter);
        id
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn counter(&self, id: WidgetId) -> Option<&Counter> {
        self.counters.iter().find(|counter| counter.id() == id)
    }

    /// Counter by mount position
    pub fn counter_at(&self, index: usize) -> Option<&Counter> {
        self.counters.get(index)
    }

    /// Handle one host event
    pub fn dispatch(&mut self, event: PageEvent) -> Result<()> {
        match event {
            PageEvent::Widget { widget, event } => self.send(widget, &event),
            PageEvent::SelectTheme { theme } => self.select_theme(&theme).map(|_| ()),
        }
    }

    /// Deliver an event to the mounted widget `id`
    pub fn send(&mut self, id: WidgetId, event: &Event) -> Result<()> {
        let Some(counter) = self.counters.iter_mut().find(|counter| counter.id() == id) else {
            warn!(widget = id, "event for unknown widget");
            return Err(UiError::UnknownWidget(id));
        };
        if !counter.on_event(event, &mut self.context) {
            debug!(widget = id, ?event, "event refused");
        }
        Ok(())
    }

    /// Delegated click handler for the theme selector: resolve the button's
    /// theme tag and broadcast it
    pub fn select_theme(&mut self, tag: &str) -> Result<Theme> {
        let theme = tag.parse::<Theme>().map_err(|err| {
            warn!(%err, "theme selector");
            err
        })?;
        self.broadcast_theme(theme);
        Ok(theme)
    }

    /// Overwrite the theme of every mounted counter
    pub fn broadcast_theme(&mut self, theme: Theme) {
        for counter in &mut self.counters {
            counter.set_theme(theme);
        }
        info!(%theme, counters = self.counters.len(), "theme broadcast");
    }

    /// Move the page clock forward, firing due timers
    pub fn advance(&mut self, by: Duration) -> usize {
        self.context.scheduler.advance(by)
    }

    /// Move the page clock to `now` (time since the page started)
    pub fn advance_to(&mut self, now: Duration) -> usize {
        self.context.scheduler.advance_to(now)
    }

    pub fn now(&self) -> Duration {
        self.context.scheduler.now()
    }

    /// Re-render every widget whose state changed since the last call
    pub fn take_patches(&mut self) -> Vec<Patch> {
        self.context
            .take_dirty()
            .into_iter()
            .filter_map(|id| {
                self.counter(id).map(|counter| Patch {
                    widget: id,
                    html: to_html(&counter.render()),
                })
            })
            .collect()
    }

    /// Body content: heading, theme selector, the counter cards and the
    /// footer when one is set
    pub fn render(&self) -> Vec<Node> {
        let selector = Theme::ALL
            .into_iter()
            .fold(Container::new().class("theme-selector"), |selector, theme| {
                selector.child(ThemeButton::new(theme))
            });

        let cards = self.counters.iter().fold(
            Container::new().class("counters-container"),
            |cards, counter| cards.node(Container::new().class("counter-card").node(counter.render()).render()),
        );

        let mut body = vec![H1::new(self.heading.as_str()).render(), selector.render(), cards.render()];
        if let Some(footer) = &self.footer {
            body.push(Element::new("footer").text(footer.as_str()).into());
        }
        body
    }

    /// Full document: head styles plus the rendered body
    pub fn document(&self) -> Document {
        let mut document = self.document.clone();
        for node in self.render() {
            document.push_body(node);
        }
        document
    }

    pub fn to_html(&self) -> String {
        self.document().to_html()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::demo()
    }
}

/// Page-level styles: background, heading, card layout and theme selector
pub fn page_stylesheet() -> StyleSheet {
    let mut sheet = StyleSheet::new()
        .rule(
            "body",
            Style::new()
                .font_family("'Segoe UI', Tahoma, Geneva, Verdana, sans-serif")
                .prop("background", "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)")
                .margin(EdgeInsets::zero())
                .padding(Dimension::Rem(2.0))
                .min_height(Dimension::Vh(100.0))
                .display(Display::Flex)
                .flex_direction(FlexDirection::Column)
                .align_items(AlignItems::Center),
        )
        .rule(
            "h1",
            Style::new()
                .text_color("#2c3e50")
                .font_weight(FontWeight::Light)
                .margin_bottom(Dimension::Rem(2.0))
                .text_align(TextAlign::Center),
        )
        .rule(
            ".counters-container",
            Style::new()
                .display(Display::Flex)
                .flex_wrap(FlexWrap::Wrap)
                .gap(Dimension::Rem(2.0))
                .justify_content(JustifyContent::Center)
                .max_width(1200.0),
        )
        .rule(".counter-card", Style::new().margin_bottom(Dimension::Rem(1.0)))
        .rule(
            ".theme-selector",
            Style::new()
                .margin((Dimension::Rem(2.0), Dimension::Px(0.0)))
                .display(Display::Flex)
                .gap(Dimension::Rem(1.0))
                .justify_content(JustifyContent::Center),
        )
        .rule(
            ".theme-btn",
            Style::new()
                .padding(EdgeInsets::symmetric(Dimension::Rem(1.0), Dimension::Rem(0.5)))
                .border_none()
                .border_radius(4.0)
                .cursor("pointer")
                .font_weight(FontWeight::Medium)
                .transition("all 0.2s ease"),
        );

    for theme in Theme::ALL {
        sheet = sheet.rule(
            format!(".theme-btn.{}", theme.tag()),
            Style::new()
                .background_color(theme.palette().primary.to_css())
                .text_color("white"),
        );
    }

    sheet
        .rule(
            ".theme-btn:hover",
            Style::new()
                .transform("translateY(-2px)")
                .shadow(Shadow::new(0.0, 4.0, 8.0, Color::rgba(0, 0, 0, 0.1))),
        )
        .rule(
            "footer",
            Style::new()
                .margin_top(Dimension::Rem(3.0))
                .text_align(TextAlign::Center)
                .text_color("#7f8c8d")
                .font_size(Dimension::Rem(0.9)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::widgets::PULSE_DURATION;

    fn ids(page: &Page) -> Vec<WidgetId> {
        page.counters().iter().map(|counter| counter.id()).collect()
    }

    #[test]
    fn test_demo_mounts_three_counters() {
        let page = Page::demo();
        let summary: Vec<(i64, i64, i64, i64, Theme)> = page
            .counters()
            .iter()
            .map(|c| {
                let cfg = c.config();
                (c.count(), cfg.min, cfg.max, cfg.step, c.theme())
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                (5, 0, 10, 1, Theme::Blue),
                (50, 0, 100, 5, Theme::Green),
                (0, -10, 10, 2, Theme::Purple),
            ]
        );
    }

    #[test]
    fn test_broadcast_theme_keeps_counts() {
        let mut page = Page::demo();
        let first = ids(&page)[0];
        page.send(first, &Event::click(Action::Increment)).unwrap();

        assert_eq!(page.select_theme("green").unwrap(), Theme::Green);
        assert!(page.counters().iter().all(|c| c.theme() == Theme::Green));
        let counts: Vec<i64> = page.counters().iter().map(Counter::count).collect();
        assert_eq!(counts, vec![6, 50, 0]);
    }

    #[test]
    fn test_unknown_theme_changes_nothing() {
        let mut page = Page::demo();
        page.take_patches();
        assert_eq!(page.select_theme("orange"), Err(UiError::UnknownTheme("orange".into())));
        let themes: Vec<Theme> = page.counters().iter().map(Counter::theme).collect();
        assert_eq!(themes, vec![Theme::Blue, Theme::Green, Theme::Purple]);
        assert!(page.take_patches().is_empty());
    }

    #[test]
    fn test_dispatch_routes_to_one_widget() {
        let mut page = Page::demo();
        let second = ids(&page)[1];
        page.dispatch(PageEvent::Widget { widget: second, event: Event::change("73") }).unwrap();

        let counts: Vec<i64> = page.counters().iter().map(Counter::count).collect();
        assert_eq!(counts, vec![5, 73, 0]);
        assert_eq!(page.dispatch(PageEvent::Widget { widget: 0, event: Event::change("1") }), Err(UiError::UnknownWidget(0)));
    }

    #[test]
    fn test_patches_follow_changes_and_timers() {
        let mut page = Page::demo();
        let [a, b, c] = <[WidgetId; 3]>::try_from(ids(&page)).unwrap();
        // mounting marks every counter
        assert_eq!(page.take_patches().iter().map(|p| p.widget).collect::<Vec<_>>(), vec![a, b, c]);

        page.send(b, &Event::click(Action::Decrement)).unwrap();
        let patches = page.take_patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].widget, b);
        assert!(patches[0].html.contains("value-animate"));
        assert!(patches[0].html.contains(">45</div>"));

        assert!(page.take_patches().is_empty());
        assert_eq!(page.advance(PULSE_DURATION), 1);
        let patches = page.take_patches();
        assert_eq!(patches.len(), 1);
        assert!(!patches[0].html.contains("value-animate"));
    }

    #[test]
    fn test_broadcast_patches_every_counter() {
        let mut page = Page::demo();
        page.take_patches();
        page.dispatch(PageEvent::SelectTheme { theme: "purple".into() }).unwrap();
        let patches = page.take_patches();
        assert_eq!(patches.len(), 3);
        assert!(patches.iter().all(|p| p.html.contains("theme-purple")));
    }

    #[test]
    fn test_page_markup() {
        let page = Page::demo().with_heading("Counters");
        let body = page.render();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].text_content(), "Counters");

        let selector = body[1].as_element().unwrap();
        let tags: Vec<&str> = selector
            .find_all("button")
            .iter()
            .filter_map(|b| b.attr_value("data-theme"))
            .collect();
        assert_eq!(tags, vec!["blue", "green", "purple"]);

        let cards = body[2].as_element().unwrap();
        assert!(cards.has_class("counters-container"));
        assert_eq!(cards.child_nodes().len(), 3);
        assert!(cards.find_by_class("counter-card").unwrap().find_by_class("counter-container").is_some());
    }

    #[test]
    fn test_footer_is_optional() {
        assert_eq!(Page::demo().render().len(), 3);

        let body = Page::demo().with_footer("Built with Tally").render();
        assert_eq!(body.len(), 4);
        let footer = body[3].as_element().unwrap();
        assert_eq!(footer.tag(), "footer");
        assert_eq!(footer.text_content(), "Built with Tally");
    }

    #[test]
    fn test_styles_injected_once() {
        let mut page = Page::new("Styles");
        assert_eq!(page.document().style_names().collect::<Vec<_>>(), vec!["page"]);
        page.mount(CounterConfig::default());
        page.mount(CounterConfig::default());

        let html = page.to_html();
        assert_eq!(html.matches("data-sheet=").count(), 2);
        assert_eq!(html.matches("@keyframes pulse").count(), 1);
        assert!(html.contains("<title>Styles</title>"));
    }

    #[test]
    fn test_page_event_json() {
        let event: PageEvent = serde_json::from_str(
            r#"{"kind":"widget","widget":7,"event":{"type":"click","action":"reset"}}"#,
        )
        .unwrap();
        assert_eq!(event, PageEvent::Widget { widget: 7, event: Event::click(Action::Reset) });

        let event: PageEvent = serde_json::from_str(r#"{"kind":"select_theme","theme":"blue"}"#).unwrap();
        assert_eq!(event, PageEvent::SelectTheme { theme: "blue".into() });
    }

    #[test]
    fn test_global_stylesheet() {
        let sheet = page_stylesheet();
        assert_eq!(sheet.find(".theme-btn.green").and_then(|s| s.get("background-color")), Some("#2ecc71"));
        assert_eq!(sheet.find(".theme-selector").and_then(|s| s.get("margin")), Some("2rem 0"));
    }
}
