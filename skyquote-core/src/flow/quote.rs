use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, Local};
use parking_lot::Mutex;

use crate::{
    error::FetchError,
    model::{FlowState, Quote},
    presentation::{Control, Field, Markup, PresentationSink, StatusClass},
    provider::QuoteSource,
};

pub const ERROR_TEXT: &str = "Could not load a quote right now.";
pub const ERROR_AUTHOR: &str = "— Please try again.";
pub const ERROR_STATUS: &str = "Error fetching quote. It might be a network or API issue.";

/// Fetches a random quote and writes it to the quote fields.
///
/// Overlapping runs are allowed; only the most recently started run may
/// touch the display once its fetch resolves.
#[derive(Debug)]
pub struct QuoteFlow {
    source: Arc<dyn QuoteSource>,
    sink: Arc<dyn PresentationSink>,
    latest: AtomicU64,
    state: Mutex<FlowState>,
}

impl QuoteFlow {
    pub fn new(source: Arc<dyn QuoteSource>, sink: Arc<dyn PresentationSink>) -> Self {
        Self { source, sink, latest: AtomicU64::new(0), state: Mutex::new(FlowState::Idle) }
    }

    pub fn state(&self) -> FlowState {
        *self.state.lock()
    }

    pub async fn run(&self) {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        *self.state.lock() = FlowState::Loading;
        self.sink.set_enabled(Control::NewQuote, false);
        self.sink.set_markup(Field::QuoteStatus, Markup::Loading("Loading quote"));

        let result = self.source.fetch_quote().await;

        if self.latest.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Discarding quote result from a superseded run");
            return;
        }

        self.sink.set_text(Field::QuoteStatus, "");
        self.sink.set_enabled(Control::NewQuote, true);

        match result {
            Ok(quote) => self.show_quote(&quote, Local::now()),
            Err(err) => self.show_error(&err),
        }
    }

    fn show_quote(&self, quote: &Quote, now: DateTime<Local>) {
        self.sink.set_text(Field::QuoteText, &quote.text);
        self.sink.set_text(Field::QuoteAuthor, &format!("— {}", quote.author));
        self.sink.set_text(Field::QuoteTime, &format!("Updated at {}", format_time(&now)));
        self.sink.remove_class(Field::QuoteStatus, StatusClass::Error);

        *self.state.lock() = FlowState::Success;
        tracing::debug!(author = %quote.author, "Quote updated");
    }

    fn show_error(&self, err: &FetchError) {
        tracing::error!("Failed to fetch quote: {err}");

        self.sink.set_text(Field::QuoteText, ERROR_TEXT);
        self.sink.set_text(Field::QuoteAuthor, ERROR_AUTHOR);
        self.sink.add_class(Field::QuoteStatus, StatusClass::Error);
        self.sink.set_text(Field::QuoteStatus, ERROR_STATUS);

        *self.state.lock() = FlowState::Error;
    }
}

/// Short `HH:MM` wall-clock time.
pub fn format_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::MemorySink;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    /// Replies to the n-th call with the n-th queued response.
    #[derive(Debug, Default)]
    struct ScriptedQuotes {
        replies: Mutex<VecDeque<oneshot::Receiver<Result<Quote, FetchError>>>>,
    }

    impl ScriptedQuotes {
        fn push(&self) -> oneshot::Sender<Result<Quote, FetchError>> {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().push_back(rx);
            tx
        }
    }

    #[async_trait]
    impl QuoteSource for ScriptedQuotes {
        async fn fetch_quote(&self) -> Result<Quote, FetchError> {
            let rx = self.replies.lock().pop_front().expect("unexpected fetch");
            rx.await.expect("reply sender dropped")
        }
    }

    fn quote(text: &str, author: &str) -> Quote {
        Quote { text: text.into(), author: author.into() }
    }

    fn server_error() -> FetchError {
        FetchError::status(StatusCode::INTERNAL_SERVER_ERROR, "")
    }

    fn setup() -> (Arc<ScriptedQuotes>, Arc<MemorySink>, QuoteFlow) {
        let source = Arc::new(ScriptedQuotes::default());
        let sink = Arc::new(MemorySink::new());
        let flow = QuoteFlow::new(source.clone(), sink.clone());
        (source, sink, flow)
    }

    #[tokio::test]
    async fn success_renders_quote_author_and_time() {
        let (source, sink, flow) = setup();
        source.push().send(Ok(quote("Be water.", "Bruce Lee"))).unwrap();

        flow.run().await;

        assert_eq!(sink.text(Field::QuoteText), "Be water.");
        assert_eq!(sink.text(Field::QuoteAuthor), "— Bruce Lee");
        let time = sink.text(Field::QuoteTime);
        assert!(time.starts_with("Updated at "));
        assert!(time.len() > "Updated at ".len());
        assert_eq!(sink.text(Field::QuoteStatus), "");
        assert!(!sink.has_class(Field::QuoteStatus, StatusClass::Error));
        assert!(sink.is_enabled(Control::NewQuote));
        assert_eq!(flow.state(), FlowState::Success);
    }

    #[tokio::test]
    async fn failure_renders_fixed_error_and_reenables_trigger() {
        let (source, sink, flow) = setup();
        source.push().send(Err(server_error())).unwrap();

        flow.run().await;

        assert_eq!(sink.text(Field::QuoteText), ERROR_TEXT);
        assert_eq!(sink.text(Field::QuoteAuthor), ERROR_AUTHOR);
        assert_eq!(sink.text(Field::QuoteStatus), ERROR_STATUS);
        assert!(sink.has_class(Field::QuoteStatus, StatusClass::Error));
        assert!(sink.is_enabled(Control::NewQuote));
        assert_eq!(flow.state(), FlowState::Error);
    }

    #[tokio::test]
    async fn loading_disables_trigger_until_resolved() {
        let (source, sink, flow) = setup();
        let reply = source.push();

        let check = async {
            tokio::task::yield_now().await;
            assert!(!sink.is_enabled(Control::NewQuote));
            assert_eq!(sink.markup(Field::QuoteStatus), Some(Markup::Loading("Loading quote")));
            assert_eq!(flow.state(), FlowState::Loading);
            reply.send(Ok(quote("a", "b"))).unwrap();
        };

        tokio::join!(flow.run(), check);
        assert!(sink.is_enabled(Control::NewQuote));
    }

    #[tokio::test]
    async fn rerun_after_success_depends_only_on_next_response() {
        let (source, sink, flow) = setup();

        source.push().send(Ok(quote("first", "A"))).unwrap();
        flow.run().await;
        assert_eq!(flow.state(), FlowState::Success);

        source.push().send(Err(server_error())).unwrap();
        flow.run().await;
        assert_eq!(flow.state(), FlowState::Error);
        assert!(sink.has_class(Field::QuoteStatus, StatusClass::Error));

        source.push().send(Ok(quote("third", "C"))).unwrap();
        flow.run().await;
        assert_eq!(flow.state(), FlowState::Success);
        assert_eq!(sink.text(Field::QuoteText), "third");
        assert!(!sink.has_class(Field::QuoteStatus, StatusClass::Error));
    }

    #[tokio::test]
    async fn superseded_run_does_not_overwrite_latest() {
        let (source, sink, flow) = setup();
        let first = source.push();
        let second = source.push();

        let driver = async {
            tokio::task::yield_now().await;
            second.send(Ok(quote("newer", "B"))).unwrap();
            tokio::task::yield_now().await;
            first.send(Ok(quote("older", "A"))).unwrap();
        };

        tokio::join!(flow.run(), flow.run(), driver);

        assert_eq!(sink.text(Field::QuoteText), "newer");
        assert_eq!(sink.text(Field::QuoteAuthor), "— B");
        assert!(sink.is_enabled(Control::NewQuote));
        assert_eq!(flow.state(), FlowState::Success);
    }

    #[test]
    fn time_is_two_digit_hours_and_minutes() {
        let at = Local.with_ymd_and_hms(2024, 1, 1, 9, 5, 0).unwrap();
        assert_eq!(format_time(&at), "09:05");
    }
}
