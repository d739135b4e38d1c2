//! The display fields the flows write into.
//!
//! Flows never own the display; they receive a [`PresentationSink`] and
//! address fields by [`Field`].

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug};

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    QuoteText,
    QuoteAuthor,
    QuoteTime,
    QuoteStatus,
    Temperature,
    WeatherDescription,
    WeatherIcon,
    WeatherLocation,
    FeelsLike,
    Wind,
    Humidity,
    WeatherStatus,
}

/// User-facing controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    NewQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Error,
    Success,
}

/// Structured content a sink renders in its own way.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    /// Animated "in progress" indicator, e.g. `Loading quote...`.
    Loading(&'static str),
    /// A whole-degree Celsius temperature.
    Temperature(i64),
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Markup::Loading(label) => write!(f, "{label}..."),
            Markup::Temperature(value) => write!(f, "{value}°C"),
        }
    }
}

pub trait PresentationSink: Send + Sync + Debug {
    fn set_text(&self, field: Field, text: &str);
    fn set_markup(&self, field: Field, markup: Markup);
    fn set_enabled(&self, control: Control, enabled: bool);
    fn add_class(&self, field: Field, class: StatusClass);
    fn remove_class(&self, field: Field, class: StatusClass);
}

#[derive(Debug, Default)]
struct SinkState {
    text: HashMap<Field, String>,
    markup: HashMap<Field, Markup>,
    classes: HashSet<(Field, StatusClass)>,
    disabled: HashSet<Control>,
}

/// In-memory display; fields start empty and controls start enabled.
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<SinkState>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rendered content of `field`, empty if never written.
    pub fn text(&self, field: Field) -> String {
        let state = self.state.lock();
        if let Some(markup) = state.markup.get(&field) {
            return markup.to_string();
        }
        state.text.get(&field).cloned().unwrap_or_default()
    }

    pub fn markup(&self, field: Field) -> Option<Markup> {
        self.state.lock().markup.get(&field).cloned()
    }

    pub fn has_class(&self, field: Field, class: StatusClass) -> bool {
        self.state.lock().classes.contains(&(field, class))
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        !self.state.lock().disabled.contains(&control)
    }
}

impl PresentationSink for MemorySink {
    fn set_text(&self, field: Field, text: &str) {
        let mut state = self.state.lock();
        state.markup.remove(&field);
        state.text.insert(field, text.to_string());
    }

    fn set_markup(&self, field: Field, markup: Markup) {
        let mut state = self.state.lock();
        state.text.remove(&field);
        state.markup.insert(field, markup);
    }

    fn set_enabled(&self, control: Control, enabled: bool) {
        let mut state = self.state.lock();
        if enabled {
            state.disabled.remove(&control);
        } else {
            state.disabled.insert(control);
        }
    }

    fn add_class(&self, field: Field, class: StatusClass) {
        self.state.lock().classes.insert((field, class));
    }

    fn remove_class(&self, field: Field, class: StatusClass) {
        self.state.lock().classes.remove(&(field, class));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_replaces_markup_and_back() {
        let sink = MemorySink::new();
        sink.set_markup(Field::QuoteStatus, Markup::Loading("Loading quote"));
        assert_eq!(sink.text(Field::QuoteStatus), "Loading quote...");

        sink.set_text(Field::QuoteStatus, "");
        assert_eq!(sink.text(Field::QuoteStatus), "");
        assert!(sink.markup(Field::QuoteStatus).is_none());
    }

    #[test]
    fn temperature_markup_renders_unit() {
        assert_eq!(Markup::Temperature(21).to_string(), "21°C");
        assert_eq!(Markup::Temperature(-3).to_string(), "-3°C");
    }

    #[test]
    fn controls_toggle() {
        let sink = MemorySink::new();
        assert!(sink.is_enabled(Control::NewQuote));
        sink.set_enabled(Control::NewQuote, false);
        assert!(!sink.is_enabled(Control::NewQuote));
        sink.set_enabled(Control::NewQuote, true);
        assert!(sink.is_enabled(Control::NewQuote));
    }

    #[test]
    fn classes_are_per_field() {
        let sink = MemorySink::new();
        sink.add_class(Field::WeatherStatus, StatusClass::Error);
        assert!(sink.has_class(Field::WeatherStatus, StatusClass::Error));
        assert!(!sink.has_class(Field::QuoteStatus, StatusClass::Error));

        sink.remove_class(Field::WeatherStatus, StatusClass::Error);
        assert!(!sink.has_class(Field::WeatherStatus, StatusClass::Error));
    }
}
