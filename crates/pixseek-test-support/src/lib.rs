//! Test support utilities for pixseek.
//!
//! Provides mock ports and synthetic record builders for exercising the
//! pagination core without a network.
//!
//! # Example
//!
//! ```
//! use pixseek_test_support::{MockPresentationSink, MockResultSource, RecordBuilder};
//!
//! // A source that knows 30 cats
//! let source = MockResultSource::new().with_catalog("cats", 30);
//! let sink = MockPresentationSink::new();
//!
//! let record = RecordBuilder::numbered("cats", 0);
//! assert_eq!(record.tags, "cats, #0");
//! ```

mod builders;
mod mocks;

pub use builders::{PageBuilder, RecordBuilder};
pub use mocks::{MockPresentationSink, MockResultSource, SearchCall, SinkEvent};
