//! Core engine for the event window alerter.
//!
//! Pure logic only: recurring daily time windows, phase evaluation over an
//! injected clock, and the fade presenter state machine. Nothing in here
//! touches the desktop shell, so all of it is unit-testable.

pub mod clock;
pub mod presenter;
pub mod schedule;

pub use clock::{Clock, SystemClock};
pub use presenter::{Directive, FadeTiming, MessageKind, Presenter, Visibility};
pub use schedule::{Phase, ScheduleError, TimeWindow, WindowSet};
