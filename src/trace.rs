//! Step-by-step trace output for algorithm debugging.
//!
//! With the `trace` cargo feature enabled, the driver emits one tagged
//! line per key event into a [`TraceWriter`]:
//!
//! ```text
//! TRACE INIT f=<val> samples=1
//! TRACE SELECT depth=<h> f=<val> samples=<n>
//! TRACE EXPAND child_best=<val> samples=<n>
//! TRACE ENDSTEP t=<n> best=<val> w=<w> samples=<n>
//! ```
//!
//! Without the feature the `trace_write!` macro compiles to nothing and
//! the engine carries no tracer at all.

use std::io::Write;
use std::sync::Mutex;

/// Thread-safe sink collecting trace lines.
pub struct TraceWriter {
    lines: Mutex<Vec<String>>,
}

impl TraceWriter {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Append one formatted line.
    pub fn write_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(args.to_string());
    }

    /// All collected lines, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// All collected output as one newline-terminated string.
    pub fn output(&self) -> String {
        let lines = self.lines.lock().unwrap();
        let mut out = String::new();
        for line in lines.iter() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Dump collected output to stderr.
    pub fn dump_to_stderr(&self) {
        let _ = std::io::stderr().write_all(self.output().as_bytes());
    }
}

impl Default for TraceWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Emit a trace line into an optional tracer (only with the `trace`
/// feature).
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_write {
    ($tracer:expr, $($arg:tt)*) => {
        if let Some(ref tw) = $tracer {
            tw.write_fmt(format_args!($($arg)*));
        }
    };
}

/// No-op when the `trace` feature is disabled.
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_write {
    ($tracer:expr, $($arg:tt)*) => {};
}
