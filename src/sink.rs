//! Output sinks for verification reports.
//!
//! A sink receives whole human-readable lines. Success lines go to
//! [`Sink::info`], failures to [`Sink::error`].

use std::io::{self, Write};

/// Line-oriented destination for run reports.
pub trait Sink {
    fn info(&mut self, line: &str);
    fn error(&mut self, line: &str);
}

/// Sink writing to a pair of `io::Write` streams.
///
/// Write failures are logged and dropped; a broken output stream never
/// aborts a run.
pub struct WriterSink<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> WriterSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Consume the sink and return its streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl WriterSink<io::Stdout, io::Stderr> {
    /// Sink on the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

fn write_line<W: Write>(w: &mut W, line: &str) {
    if let Err(e) = writeln!(w, "{line}").and_then(|_| w.flush()) {
        tracing::warn!("Failed to write report line: {}", e);
    }
}

impl<O: Write, E: Write> Sink for WriterSink<O, E> {
    fn info(&mut self, line: &str) {
        write_line(&mut self.out, line);
    }

    fn error(&mut self, line: &str) {
        write_line(&mut self.err, line);
    }
}

/// A line captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkLine {
    Info(String),
    Error(String),
}

/// Sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<SinkLine>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            SinkLine::Info(s) => Some(s.as_str()),
            SinkLine::Error(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            SinkLine::Error(s) => Some(s.as_str()),
            SinkLine::Info(_) => None,
        })
    }
}

impl Sink for MemorySink {
    fn info(&mut self, line: &str) {
        self.lines.push(SinkLine::Info(line.to_string()));
    }

    fn error(&mut self, line: &str) {
        self.lines.push(SinkLine::Error(line.to_string()));
    }
}
