use skyquote_core::{Control, Field, Markup, MemorySink, PresentationSink, StatusClass};

/// Keeps the display in memory and echoes progress indicators to stderr.
#[derive(Debug, Default)]
pub struct TerminalSink {
    state: MemorySink,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MemorySink {
        &self.state
    }
}

impl PresentationSink for TerminalSink {
    fn set_text(&self, field: Field, text: &str) {
        self.state.set_text(field, text);
    }

    fn set_markup(&self, field: Field, markup: Markup) {
        if let Markup::Loading(_) = markup {
            eprintln!("{markup}");
        }
        self.state.set_markup(field, markup);
    }

    fn set_enabled(&self, control: Control, enabled: bool) {
        self.state.set_enabled(control, enabled);
    }

    fn add_class(&self, field: Field, class: StatusClass) {
        self.state.add_class(field, class);
    }

    fn remove_class(&self, field: Field, class: StatusClass) {
        self.state.remove_class(field, class);
    }
}
