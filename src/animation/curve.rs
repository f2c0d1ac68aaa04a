use crate::{animation::ease::Ease, foundation::core::FrameIndex};

/// One control point of a [`Curve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveKey {
    /// Frame the value is anchored at.
    pub frame: FrameIndex,
    /// Value at that frame.
    pub value: f64,
    /// Ease applied toward the next key.
    pub ease: Ease,
}

/// Interpolation rule between adjacent keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    /// Step function: hold the left key's value until the next key.
    Hold,
    /// Linear interpolation, shaped by the left key's ease.
    Linear,
}

/// Sparse scalar keyframe curve, evaluable at any frame.
///
/// A curve with no authored keys evaluates to its `neutral` value everywhere
/// (0 for displacements and rotation offsets, 1 for scale factors). Queries
/// before the first key or after the last key clamp to the end values; no
/// extrapolation is performed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    keys: Vec<CurveKey>, // sorted by frame, unique per frame
    mode: InterpMode,
    neutral: f64,
}

impl Curve {
    /// Empty curve evaluating to `neutral` until keys are authored.
    pub fn new(neutral: f64, mode: InterpMode) -> Self {
        Self {
            keys: Vec::new(),
            mode,
            neutral,
        }
    }

    /// The value an empty curve evaluates to.
    pub fn neutral(&self) -> f64 {
        self.neutral
    }

    /// Authored keys in frame order.
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Number of authored keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no keys are authored.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// First authored frame, if any.
    pub fn first_frame(&self) -> Option<FrameIndex> {
        self.keys.first().map(|k| k.frame)
    }

    /// Last authored frame, if any.
    pub fn last_frame(&self) -> Option<FrameIndex> {
        self.keys.last().map(|k| k.frame)
    }

    /// True iff a key is authored at exactly `frame`.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        self.keys
            .binary_search_by_key(&frame.0, |k| k.frame.0)
            .is_ok()
    }

    /// Insert a key with [`Ease::Linear`], overwriting any key at the same frame.
    pub fn set_key(&mut self, frame: FrameIndex, value: f64) {
        self.set_key_eased(frame, value, Ease::Linear);
    }

    /// Insert a key with an explicit ease, overwriting any key at the same frame.
    pub fn set_key_eased(&mut self, frame: FrameIndex, value: f64, ease: Ease) {
        match self.keys.binary_search_by_key(&frame.0, |k| k.frame.0) {
            Ok(i) => self.keys[i] = CurveKey { frame, value, ease },
            Err(i) => self.keys.insert(i, CurveKey { frame, value, ease }),
        }
    }

    /// Remove the key at `frame`. Returns false when no key existed there.
    pub fn remove_key(&mut self, frame: FrameIndex) -> bool {
        match self.keys.binary_search_by_key(&frame.0, |k| k.frame.0) {
            Ok(i) => {
                self.keys.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove every authored key; the curve evaluates to `neutral` again.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Rescale the frame coordinate of every key by `scale`.
    ///
    /// Keys that collide after rounding keep the later value. Non-positive or
    /// non-finite factors are ignored.
    pub fn scale_frames(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            tracing::warn!(scale, "ignoring invalid curve frame scale");
            return;
        }

        let mut scaled: Vec<CurveKey> = Vec::with_capacity(self.keys.len());
        for k in self.keys.drain(..) {
            let frame = FrameIndex(((k.frame.0 as f64) * scale).round().max(1.0) as u64);
            if let Some(last) = scaled.last_mut()
                && last.frame == frame
            {
                *last = CurveKey { frame, ..k };
            } else {
                scaled.push(CurveKey { frame, ..k });
            }
        }
        self.keys = scaled;
    }

    /// Evaluate the curve at `frame`.
    pub fn value_at(&self, frame: FrameIndex) -> f64 {
        if self.keys.is_empty() {
            return self.neutral;
        }

        let f = frame.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return self.keys[0].value;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value;
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return a.value;
        }

        match self.mode {
            InterpMode::Hold => a.value,
            InterpMode::Linear => {
                let t = ((f - a.frame.0) as f64) / (denom as f64);
                let te = a.ease.apply(t);
                a.value + (b.value - a.value) * te
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
