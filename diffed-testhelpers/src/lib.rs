#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use diffed_testhelpers_macros::test;

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a `Targets` filter, e.g.
/// `diffed_assert=debug,warn`.
pub const LOG_ENV: &str = "DIFFED_LOG";

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Timestamps log lines relative to the first test that called [`setup`].
struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Frames from the test harness and panic machinery, which say nothing about
/// the failing assertion.
fn is_harness_frame(name: &str) -> bool {
    const PREFIXES: &[&str] = &[
        "test::run_test",
        "test::__rust_begin_short_backtrace",
        "std::panicking::",
        "std::panic::",
        "core::panicking::",
        "std::sys::",
        "std::thread::Builder::spawn_unchecked_",
        "core::ops::function::FnOnce::call_once",
        "<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once",
        "<core::panic::unwind_safe::AssertUnwindSafe<F> as core::ops::function::FnOnce<()>>::call_once",
        "__pthread",
    ];
    PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

fn parse_filter(value: Option<&str>) -> Targets {
    value
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::DEBUG))
}

static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let _ = *START_TIME;

    color_backtrace::BacktracePrinter::new()
        .verbosity(color_backtrace::Verbosity::Full)
        .add_frame_filter(Box::new(|frames| {
            frames.retain(|frame| frame.name.as_deref().is_none_or(|name| !is_harness_frame(name)))
        }))
        .install(Box::new(termcolor::StandardStream::stderr(
            termcolor::ColorChoice::AlwaysAnsi,
        )));

    let filter = parse_filter(std::env::var(LOG_ENV).ok().as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(Uptime)
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_test_writer()
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Installs the shared tracing subscriber and colored panic backtraces.
///
/// Safe to call from every test: initialization happens once per process.
/// Log output goes through the test writer, so it is captured alongside the
/// test unless `--nocapture` is given.
pub fn setup() {
    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}

/// Calls [`setup`], then enters a `test` span named after the running test.
///
/// The `#[test]` attribute calls this; the span lasts until the returned
/// guard is dropped at the end of the test body.
pub fn enter(name: &'static str) -> tracing::span::EnteredSpan {
    setup();
    tracing::info_span!("test", case = name).entered()
}
