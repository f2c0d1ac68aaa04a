//! trackbox is a sparse, time-indexed bounding-box animation engine.
//!
//! It tracks the position, size, and orientation of a rectangular region of
//! interest across a sequence of video frames: externally-tracked box samples
//! are stored on a normalized time axis, interpolated at arbitrary frame
//! numbers, and composed with five user-authored adjustment curves
//! (translation, scale, rotation). The consuming compositing pipeline asks
//! one question — "where is the object at frame N?" — and always gets a box
//! back.
//!
//! # Evaluation path
//!
//! 1. **Map**: `FrameIndex + Fps + time scale -> normalized time` (pure,
//!    identical on write and read paths)
//! 2. **Bracket**: ordered lookup over the sparse [`BoxTimeline`]
//! 3. **Interpolate**: field-wise linear blend between the two surrounding
//!    samples, clamping at the stored range's ends
//! 4. **Compose**: the five [`Curve`]s adjust the resolved box on every call
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: evaluation is a pure function of aggregate state and
//!   the requested frame; no caching is observable.
//! - **Always returns**: the render path never sees an error mid-frame — an
//!   empty timeline yields the sentinel box, degenerate brackets fall back to
//!   the left sample.
//! - **Single-threaded mutation**: load and edit from one thread, then share
//!   `&TrackedBox` freely; the whole read path is `&self`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod track;

pub use animation::curve::{Curve, CurveKey, InterpMode};
pub use animation::ease::Ease;
pub use foundation::core::{Affine, Fps, FrameIndex, Point, Rect, Vec2};
pub use foundation::error::{TrackboxError, TrackboxResult};
pub use track::bbox::BBox;
pub use track::data::{TrackedRecord, decode_records, read_records};
pub use track::object::{TrackedBox, interpolate_boxes};
pub use track::properties::PropertySource;
pub use track::timeline::{BoxTimeline, Bracket, frame_to_time};
