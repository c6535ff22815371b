//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive a `PagerApp<TestBackend>` with key
//! presses and inspect the viewer and the rendered screen.

mod crash_regression;

/// Plain-text log with 40 lines; ERROR on lines 7 and 23, WARN on every
/// tenth line.
const SERVER_LOG: &str = "tests/fixtures/server.log";
