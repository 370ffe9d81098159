//! Operator status output
//!
//! Line-oriented, human-readable, unstructured. Implementations add their own
//! line terminator.

/// Destination for status lines
pub trait StatusSink {
    /// Emit one status line
    ///
    /// Must not block; implementations that cannot accept the line drop it.
    fn notify(&mut self, line: &str);
}

impl<T: StatusSink + ?Sized> StatusSink for &mut T {
    fn notify(&mut self, line: &str) {
        (**self).notify(line)
    }
}
