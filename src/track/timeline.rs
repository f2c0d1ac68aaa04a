use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::{
    foundation::core::{Fps, FrameIndex},
    track::bbox::BBox,
};

/// Map a frame number to the timeline's normalized time unit.
///
/// Deterministic pure function: `(frame - 1) / (fps * time_scale)`. The same
/// mapping must be used when writing and when querying timeline keys; the
/// engine authors keys at `time_scale` 1.0 and queries with the aggregate's
/// current scale.
pub fn frame_to_time(frame: FrameIndex, fps: Fps, time_scale: f64) -> f64 {
    (frame.0.saturating_sub(1) as f64) / (fps.as_f64() * time_scale)
}

/// Result of a bracketing lookup over a [`BoxTimeline`].
#[derive(Clone, Copy, Debug)]
pub enum Bracket<'a> {
    /// No samples stored.
    Empty,
    /// The query hit a stored key exactly, or fell outside the stored range
    /// and clamps to the nearest end sample.
    Nearest(&'a BBox),
    /// The query falls strictly between two stored samples.
    Between {
        /// Greatest stored time <= the query.
        t1: f64,
        /// Sample at `t1`.
        left: &'a BBox,
        /// Least stored time >= the query.
        t2: f64,
        /// Sample at `t2`.
        right: &'a BBox,
    },
}

/// Sparse ordered mapping from normalized time to [`BBox`] samples.
///
/// Keys are unique and iterate in ascending time order; later writes at the
/// same time replace earlier ones. Predecessor/successor queries run in
/// logarithmic time over the backing ordered map.
#[derive(Clone, Debug, Default)]
pub struct BoxTimeline {
    samples: BTreeMap<OrderedFloat<f64>, BBox>,
}

impl BoxTimeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the sample at `time`, returning any replaced sample.
    pub fn insert(&mut self, time: f64, sample: BBox) -> Option<BBox> {
        self.samples.insert(OrderedFloat(time), sample)
    }

    /// Remove the sample at exactly `time`, if present.
    pub fn remove(&mut self, time: f64) -> Option<BBox> {
        self.samples.remove(&OrderedFloat(time))
    }

    /// True iff a sample is stored at exactly `time`.
    pub fn contains(&self, time: f64) -> bool {
        self.samples.contains_key(&OrderedFloat(time))
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every stored sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Earliest stored sample, if any.
    pub fn first(&self) -> Option<(f64, &BBox)> {
        self.samples.iter().next().map(|(t, b)| (t.0, b))
    }

    /// Latest stored sample, if any.
    pub fn last(&self) -> Option<(f64, &BBox)> {
        self.samples.iter().next_back().map(|(t, b)| (t.0, b))
    }

    /// Samples in ascending time order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &BBox)> + '_ {
        self.samples.iter().map(|(t, b)| (t.0, b))
    }

    /// Locate the samples surrounding `time`.
    pub fn bracket(&self, time: f64) -> Bracket<'_> {
        let key = OrderedFloat(time);
        let below = self.samples.range(..=key).next_back();
        let above = self.samples.range(key..).next();

        match (below, above) {
            (Some((t1, left)), Some((t2, right))) => {
                if t1 == t2 {
                    Bracket::Nearest(left)
                } else {
                    Bracket::Between {
                        t1: t1.0,
                        left,
                        t2: t2.0,
                        right,
                    }
                }
            }
            (Some((_, nearest)), None) | (None, Some((_, nearest))) => Bracket::Nearest(nearest),
            (None, None) => Bracket::Empty,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/timeline.rs"]
mod tests;
