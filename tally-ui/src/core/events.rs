//! Event system for Tally UI

use serde::{Deserialize, Serialize};

/// Events delivered to a widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A control button was pressed
    Click { action: Action },
    /// The numeric input committed a new raw value
    Change { value: String },
}

/// What a clicked control asks the widget to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Increment,
    Decrement,
    Reset,
}

impl Action {
    /// Name used in `data-action` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Increment => "increment",
            Action::Decrement => "decrement",
            Action::Reset => "reset",
        }
    }
}

impl Event {
    pub fn click(action: Action) -> Self {
        Event::Click { action }
    }

    pub fn change(value: impl Into<String>) -> Self {
        Event::Change { value: value.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&Event::click(Action::Increment)).unwrap();
        assert_eq!(json, r#"{"type":"click","action":"increment"}"#);

        let parsed: Event = serde_json::from_str(r#"{"type":"change","value":"42"}"#).unwrap();
        assert_eq!(parsed, Event::change("42"));
    }

    #[test]
    fn test_action_names_match_serde() {
        for action in [Action::Increment, Action::Decrement, Action::Reset] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }
}
