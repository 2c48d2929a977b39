//! Input widgets

use crate::core::{next_widget_id, Widget, WidgetId};
use crate::render::{Element, Node};

/// Native numeric input; bounds and step are exposed as input constraints
pub struct NumberInput {
    id: WidgetId,
    value: i64,
    min: Option<i64>,
    max: Option<i64>,
    step: Option<i64>,
}

impl NumberInput {
    pub fn new(value: i64) -> Self {
        Self {
            id: next_widget_id(),
            value,
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }
}

impl Widget for NumberInput {
    fn id(&self) -> WidgetId { self.id }

    fn render(&self) -> Node {
        let mut input = Element::new("input")
            .attr("type", "number")
            .attr("value", self.value);
        if let Some(min) = self.min {
            input = input.attr("min", min);
        }
        if let Some(max) = self.max {
            input = input.attr("max", max);
        }
        if let Some(step) = self.step {
            input = input.attr("step", step);
        }
        input.into()
    }
}
