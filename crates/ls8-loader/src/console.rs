//! Writes print events to a byte stream.

use std::io::{self, Write};

use ls8_core::{OutputSink, PrintEvent};

/// Output sink that renders `PRN` values one per line and `PRA` characters
/// without a terminator.
///
/// The first write error is kept and every later event is dropped; it is
/// reported by [`ConsoleSink::finish`].
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

/// Console sink bound to the process's standard output.
pub type StdoutSink = ConsoleSink<io::Stdout>;

impl<W: Write> ConsoleSink<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flushes the writer and returns it.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while writing, or the flush error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl StdoutSink {
    /// Sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn emit(&mut self, event: PrintEvent) {
        if self.error.is_some() {
            return;
        }
        let result = match event {
            PrintEvent::Decimal(value) => writeln!(self.writer, "{value}"),
            PrintEvent::Char(c) => write!(self.writer, "{c}"),
        };
        if let Err(error) = result {
            log::warn!("dropping program output: {error}");
            self.error = Some(error);
        }
    }
}
