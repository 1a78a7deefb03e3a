/// Milliseconds, the native time unit of the widget.
///
/// Hosts may feed timestamps from any monotonic millisecond clock; the frame
/// timer's convenience handlers measure against an `Instant` epoch of their
/// own.
pub type Millis = f64;

/// Timing record for one completed render cycle. Immutable once created;
/// samples are only ever replaced wholesale by the ring's wraparound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// When this cycle's start notification fired.
    pub captured_at: Millis,
    /// Elapsed time between this cycle's start and the previous cycle's
    /// start. Captures externally imposed inter-frame delay.
    pub wait: Millis,
    /// Elapsed time between this cycle's start and end notifications.
    pub work: Millis,
}
