//! Cross-context signalling between the sampling timer and the main cycle.
//!
//! The only interaction between execution contexts in this system is the
//! periodic sampling trigger: a hardware timer callback raises a single-bit
//! "sample ready" flag, and the main evaluation cycle consumes it.
//!
//! ```text
//! ┌─────────────┐   raise()   ┌──────────────┐   take()   ┌──────────────┐
//! │ esp_timer   │────────────▶│  TickFlag    │───────────▶│  Main cycle  │
//! │ callback    │             │ (AtomicBool) │            │  (consumer)  │
//! └─────────────┘             └──────────────┘            └──────────────┘
//! ```
//!
//! Single writer (timer context), single reader (main cycle).  The reader
//! performs an atomic test-and-clear (`swap`) rather than a read followed by
//! a write, so a trigger arriving between the two can never be lost.

use core::sync::atomic::{AtomicBool, Ordering};

/// A one-bit latch set by a timer/ISR context and consumed by the main cycle.
pub struct TickFlag(AtomicBool);

impl TickFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raise the flag.  Safe to call from timer/ISR context (lock-free).
    /// Raising an already-raised flag coalesces into a single trigger.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Atomically consume the flag.  Returns `true` at most once per raise.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Peek without consuming.  Test/diagnostic use only.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Raised by the periodic sampling timer; consumed once per evaluation cycle.
static SAMPLE_READY: TickFlag = TickFlag::new();

/// Signal that a sensor sample is due.  The timer callback does nothing else.
pub fn raise_sample_ready() {
    SAMPLE_READY.raise();
}

/// Consume the sample-ready signal.  Called exactly once per cycle, before
/// any sensor access.
pub fn take_sample_ready() -> bool {
    SAMPLE_READY.take()
}
