//! Fade presenter state machine.
//!
//! Tracks the visibility of the notification surface and the linear
//! opacity ramp between hidden and visible. Two callers drive it: phase
//! evaluations from the poll loop (`apply`) and frame ticks from the
//! transition interval (`tick`). A fade always starts from the current
//! opacity with a proportionally shortened frame budget, so reversing a
//! transition mid-flight never snaps.

use serde::Serialize;

use crate::schedule::Phase;

/// Visibility of the notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

/// Which message variant the surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Pre,
    Regular,
}

/// What the driver must do after feeding the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Nothing changed.
    None,
    /// A fade started (or reversed); ensure the surface exists and the
    /// frame ticker is running.
    BeginTransition,
    /// The message text changed with no new transition.
    UpdateMessage,
}

/// Frame budget for one full fade.
#[derive(Debug, Clone, Copy)]
pub struct FadeTiming {
    pub refresh_hz: f64,
    pub transition_secs: f64,
}

impl FadeTiming {
    /// Frames needed for a full hidden/visible fade, at least one.
    pub fn target_frames(&self) -> u32 {
        (self.refresh_hz * self.transition_secs).round().max(1.0) as u32
    }

    /// Wall-clock period of one frame tick.
    pub fn frame_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.refresh_hz.max(1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

/// Notification presentation state machine.
///
/// Created once at startup and mutated only by `apply` and `tick`; within
/// a single transition the opacity is monotonic and lands exactly on 0.0
/// or 1.0 at the terminal frame.
#[derive(Debug)]
pub struct Presenter {
    visibility: Visibility,
    opacity: f64,
    /// Opacity at the instant the current transition started.
    origin: f64,
    frame: u32,
    target_frames: u32,
    /// Frame budget of a full-distance fade.
    full_frames: u32,
    message: Option<MessageKind>,
}

impl Presenter {
    pub fn new(timing: FadeTiming) -> Self {
        Self {
            visibility: Visibility::Hidden,
            opacity: 0.0,
            origin: 0.0,
            frame: 0,
            target_frames: 0,
            full_frames: timing.target_frames(),
            message: None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn message(&self) -> Option<MessageKind> {
        self.message
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.visibility, Visibility::FadingIn | Visibility::FadingOut)
    }

    /// Feed one poll evaluation into the state machine.
    pub fn apply(&mut self, phase: Phase) -> Directive {
        match phase {
            Phase::Pre => self.request_show(MessageKind::Pre),
            Phase::Active => self.request_show(MessageKind::Regular),
            Phase::Idle => self.request_hide(),
        }
    }

    /// Advance one frame. Returns true while the transition is still in
    /// flight; false once the terminal state has been reached and ticking
    /// must stop.
    pub fn tick(&mut self) -> bool {
        let terminal = match self.visibility {
            Visibility::FadingIn => 1.0,
            Visibility::FadingOut => 0.0,
            Visibility::Hidden | Visibility::Visible => return false,
        };

        self.frame += 1;
        if self.frame >= self.target_frames {
            self.opacity = terminal;
            self.visibility = if self.visibility == Visibility::FadingIn {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            return false;
        }

        let progress = self.frame as f64 / self.target_frames as f64;
        self.opacity = self.origin + (terminal - self.origin) * progress;
        true
    }

    fn request_show(&mut self, kind: MessageKind) -> Directive {
        let message_changed = self.message != Some(kind);
        self.message = Some(kind);
        match self.visibility {
            Visibility::Hidden | Visibility::FadingOut => {
                self.begin(Direction::In);
                Directive::BeginTransition
            }
            Visibility::FadingIn | Visibility::Visible => {
                if message_changed {
                    Directive::UpdateMessage
                } else {
                    Directive::None
                }
            }
        }
    }

    fn request_hide(&mut self) -> Directive {
        match self.visibility {
            Visibility::Visible | Visibility::FadingIn => {
                self.begin(Direction::Out);
                Directive::BeginTransition
            }
            Visibility::Hidden | Visibility::FadingOut => Directive::None,
        }
    }

    /// Start or reverse a fade. The ramp begins at the current opacity and
    /// the frame budget shrinks proportionally to the remaining distance.
    fn begin(&mut self, direction: Direction) {
        let remaining = match direction {
            Direction::In => 1.0 - self.opacity,
            Direction::Out => self.opacity,
        };
        self.origin = self.opacity;
        self.frame = 0;
        self.target_frames = ((self.full_frames as f64) * remaining).round().max(1.0) as u32;
        self.visibility = match direction {
            Direction::In => Visibility::FadingIn,
            Direction::Out => Visibility::FadingOut,
        };
    }
}
