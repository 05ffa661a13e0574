use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Fps;
use crate::foundation::error::{ProgError, ProgResult};

/// What happens when playback runs past either end of the frame list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopBehavior {
    /// Stop on the last (or first) frame.
    Once,
    /// Wrap around to the other end.
    #[default]
    Loop,
    /// Bounce back and play in the opposite direction.
    Reverse,
}

impl LoopBehavior {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Loop => "loop",
            Self::Reverse => "reverse",
        }
    }
}

impl fmt::Display for LoopBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoopBehavior {
    type Err = ProgError;

    fn from_str(s: &str) -> ProgResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(Self::Once),
            "loop" => Ok(Self::Loop),
            "reverse" => Ok(Self::Reverse),
            other => Err(ProgError::invalid_argument(format!(
                "unknown loop behavior '{other}' (expected once, loop or reverse)"
            ))),
        }
    }
}

/// Cursor over a fixed number of frames.
///
/// `speed` is a signed frame delta applied by every [`step`](Playback::step). While paused,
/// only [`step_once`](Playback::step_once) moves the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playback {
    len: usize,
    behavior: LoopBehavior,
    frame: usize,
    speed: i64,
    paused: bool,
}

impl Playback {
    /// Cursor at frame 0 moving forward one frame per step.
    ///
    /// With fewer than two frames there is nothing to play and the speed is zero.
    pub fn new(len: usize, behavior: LoopBehavior) -> Self {
        Self {
            len,
            behavior,
            frame: 0,
            speed: if len < 2 { 0 } else { 1 },
            paused: false,
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Loop behavior.
    pub fn behavior(&self) -> LoopBehavior {
        self.behavior
    }

    /// Current frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Current signed speed, in frames per step.
    pub fn speed(&self) -> i64 {
        self.speed
    }

    /// Set the speed. Ignored when there are fewer than two frames.
    pub fn set_speed(&mut self, speed: i64) -> &mut Self {
        self.speed = if self.len < 2 { 0 } else { speed };
        self
    }

    /// `true` while paused.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Flip the paused flag and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Advance by `speed` unless paused. Returns the new frame index.
    pub fn step(&mut self) -> usize {
        if !self.paused {
            self.advance();
        }
        self.frame
    }

    /// Advance by `speed` even while paused.
    pub fn step_once(&mut self) -> usize {
        self.advance();
        self.frame
    }

    /// Wait between frames at `fps`, in milliseconds.
    pub fn delay_ms(fps: Fps) -> u64 {
        fps.frame_delay_ms()
    }

    fn advance(&mut self) {
        if self.len < 2 {
            self.speed = 0;
            return;
        }
        let len = self.len as i64;
        let next = self.frame as i64 + self.speed;

        let frame = if self.speed > 0 && next >= len {
            match self.behavior {
                LoopBehavior::Loop => next - len,
                LoopBehavior::Reverse => {
                    self.speed = -self.speed;
                    2 * len - next - 1
                }
                LoopBehavior::Once => {
                    self.speed = 0;
                    len - 1
                }
            }
        } else if self.speed < 0 && next < 0 {
            match self.behavior {
                LoopBehavior::Loop => next + len,
                LoopBehavior::Reverse => {
                    self.speed = -self.speed;
                    -next
                }
                LoopBehavior::Once => {
                    self.speed = 0;
                    0
                }
            }
        } else {
            next
        };
        // Speeds larger than the frame count can overshoot a single wrap.
        self.frame = frame.clamp(0, len - 1) as usize;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/playback.rs"]
mod tests;
