//! JSON Lines sink.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use pixseek_core::{ImageRecord, NoticeKind, PresentationSink};
use serde::Serialize;
use tracing::warn;

/// One output line.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Clear,
    Total { total: usize },
    Record(&'a ImageRecord),
    Notice { kind: NoticeKind, message: &'a str },
}

/// Presentation sink writing one JSON object per event.
pub struct JsonlSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonlSink {
    /// Creates a sink writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a sink writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn emit(&self, events: &[Event<'_>]) {
        if let Err(e) = self.try_emit(events) {
            warn!("Failed to write output: {e}");
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn try_emit(&self, events: &[Event<'_>]) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        for event in events {
            let json = serde_json::to_string(event)?;
            writeln!(writer, "{json}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl PresentationSink for JsonlSink {
    fn clear(&self) {
        self.emit(&[Event::Clear]);
    }

    fn render_page(&self, items: &[ImageRecord]) {
        let events: Vec<Event<'_>> = items.iter().map(Event::Record).collect();
        self.emit(&events);
    }

    fn report_total(&self, total: usize) {
        self.emit(&[Event::Total { total }]);
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        self.emit(&[Event::Notice { kind, message }]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buf: &SharedBuf) -> Vec<serde_json::Value> {
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_records_are_tagged_objects() {
        let buf = SharedBuf::default();
        let sink = JsonlSink::new(Box::new(buf.clone()));
        let record = ImageRecord::new(
            42,
            "https://cdn.test/a_640.jpg",
            "https://cdn.test/a_1280.jpg",
            "red, fox",
        );

        sink.report_total(30);
        sink.render_page(&[record.clone(), record]);

        let out = lines(&buf);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], serde_json::json!({"event": "total", "total": 30}));
        assert_eq!(out[1]["event"], "record");
        assert_eq!(out[1]["id"], 42);
        assert_eq!(out[1]["tags"], "red, fox");
    }

    #[test]
    fn test_notice_and_clear() {
        let buf = SharedBuf::default();
        let sink = JsonlSink::new(Box::new(buf.clone()));

        sink.clear();
        sink.notify(NoticeKind::Failure, "Oops, the search is empty");
        sink.set_loading(true);

        let out = lines(&buf);
        assert_eq!(
            out,
            vec![
                serde_json::json!({"event": "clear"}),
                serde_json::json!({
                    "event": "notice",
                    "kind": "failure",
                    "message": "Oops, the search is empty"
                }),
            ]
        );
    }
}
