#![allow(dead_code)]

use hookline::{
    Registry,
    testing::{MockFunction, MockRuntime},
};
use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

// ============================================================================
// Log capture
// ============================================================================

/// Shared buffer receiving formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            bytes: self.bytes.clone(),
        }
    }
}

/// Per-event writer appending to a [`LogBuffer`].
pub struct LogWriter {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Write for LogWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with every log event on this thread captured, returning its
/// result and the captured text.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

// ============================================================================
// Fixtures
// ============================================================================

/// A runtime defining each `(module, function, params)` triple.
pub fn runtime_with(functions: &[(&str, &str, usize)]) -> MockRuntime {
    let runtime = MockRuntime::new();
    for (module, function, params) in functions {
        runtime.define(MockFunction::new(*module, *function).params(*params));
    }
    runtime
}

/// A registry over `runtime` that does not log subscriptions.
pub fn quiet_registry(runtime: &MockRuntime) -> Registry {
    Registry::builder(runtime.clone())
        .log_subscriptions(false)
        .build()
}
