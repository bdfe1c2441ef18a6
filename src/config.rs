//! Runtime options for the CPU and its memory map.

/// How executed instructions are rendered when tracing is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStyle {
    /// Plain nestest-style columns.
    Plain,
    /// Same columns, coloured with ANSI escapes for a terminal.
    Colored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Decode $4018-$401F by forwarding it to the peripheral registers.
    /// Off on retail hardware, where those addresses are unaddressable.
    pub test_mode: bool,
    /// Emit one `tracing` event per instruction in the given style.
    pub trace: Option<TraceStyle>,
}

impl Config {
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn with_trace(mut self, style: TraceStyle) -> Self {
        self.trace = Some(style);
        self
    }
}
