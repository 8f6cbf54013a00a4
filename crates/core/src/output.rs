//! The r29/r30 side-channel output collaborator (spec.md §3, §4.9, §9).
//!
//! Writing register 30 emits the low byte of the written value as an ASCII
//! character; writing register 29 emits the value in hexadecimal. Both are
//! suppressed for a zero value — an architectural detail the test corpus
//! depends on. This module only defines the sink interface; deciding
//! *whether* to emit is the writeback stage's job.

/// One emitted event on the output side channel, in program order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    Char(u8),
    Hex(i32),
}

/// An external collaborator that consumes side-channel bytes.
///
/// The default binding for the run tool is [`StdoutSink`]; tests use
/// [`BufferSink`] to assert on emitted output without touching real stdout.
pub trait OutputSink {
    fn write_char(&mut self, byte: u8);
    fn write_hex(&mut self, value: i32);
}

/// Writes characters to stdout and hex values to stdout formatted as `{:#x}`.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_char(&mut self, byte: u8) {
        print!("{}", byte as char);
    }

    fn write_hex(&mut self, value: i32) {
        print!("{value:#x}");
    }
}

/// Collects emitted events in memory, for tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferSink {
    pub events: Vec<OutputEvent>,
}

impl BufferSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The emitted characters concatenated into a string, ignoring hex events.
    #[must_use]
    pub fn chars(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                OutputEvent::Char(b) => Some(*b as char),
                OutputEvent::Hex(_) => None,
            })
            .collect()
    }
}

impl OutputSink for BufferSink {
    fn write_char(&mut self, byte: u8) {
        self.events.push(OutputEvent::Char(byte));
    }

    fn write_hex(&mut self, value: i32) {
        self.events.push(OutputEvent::Hex(value));
    }
}
