use std::fmt::Write;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "warn,wheel_backend=info,tower_http=info";

/// Collects the message and any structured fields as `key=value` pairs.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl tracing::field::Visit for EventVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

struct LineLayer;

impl<S: Subscriber> Layer<S> for LineLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if visitor.message.is_empty() && visitor.fields.is_empty() {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let tag = match *metadata.level() {
            Level::ERROR => "❌ Error:",
            Level::WARN => "⚠️ Warning:",
            Level::INFO => "ℹ️",
            Level::DEBUG => "🔄",
            Level::TRACE => "·",
        };
        println!(
            "[{}] {} {} - {}{}",
            timestamp,
            tag,
            metadata.target(),
            visitor.message,
            visitor.fields
        );
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn setup() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = Registry::default().with(env_filter).with(LineLayer);

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}
