use crate::foundation::error::{TrackboxError, TrackboxResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// 1-based frame number in the source footage's counting convention.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Exact rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator, must be > 0.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Construct a frame rate, rejecting zero numerators or denominators.
    pub fn new(num: u32, den: u32) -> TrackboxResult<Self> {
        if num == 0 {
            return Err(TrackboxError::validation("Fps num must be > 0"));
        }
        if den == 0 {
            return Err(TrackboxError::validation("Fps den must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as a real number of frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}
