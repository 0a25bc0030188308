use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Collects an event's message and fields into one console line.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Formats every event and hands it to `sink`. The browser build sinks into
/// `web_sys::console`.
pub struct ConsoleLayer<F> {
    sink: F,
}

impl<F> ConsoleLayer<F>
where
    F: Fn(&Level, String) + Send + Sync + 'static,
{
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<S, F> Layer<S> for ConsoleLayer<F>
where
    S: Subscriber,
    F: Fn(&Level, String) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        let line = format!("{} {}: {}{}", meta.level(), meta.target(), visitor.message, visitor.fields);
        (self.sink)(meta.level(), line);
    }
}

fn write_console(level: &Level, line: String) {
    let line = line.into();
    match *level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

pub fn init(max_level: LevelFilter) {
    let _ = tracing_subscriber::registry()
        .with(max_level)
        .with(ConsoleLayer::new(write_console))
        .try_init();
}
