use serde_json::{Value, json};

use crate::foundation::{
    core::{Affine, Rect, Vec2},
    error::{TrackboxError, TrackboxResult},
};

/// One rotatable rectangular region, described by its center, size, and
/// rotation angle in degrees.
///
/// The default value is the sentinel box (every field `-1.0`), distinguishing
/// "no tracking data" from a valid zero-sized box. Copied by value; samples
/// handed out by the engine are never shared by reference.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    /// X coordinate of the box center.
    pub cx: f64,
    /// Y coordinate of the box center.
    pub cy: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Rotation angle in degrees.
    pub angle: f64,
}

impl Default for BBox {
    fn default() -> Self {
        Self {
            cx: -1.0,
            cy: -1.0,
            width: -1.0,
            height: -1.0,
            angle: -1.0,
        }
    }
}

impl BBox {
    /// Box from explicit center, size, and angle.
    pub fn new(cx: f64, cy: f64, width: f64, height: f64, angle: f64) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
            angle,
        }
    }

    /// True when this is the sentinel box carrying no tracking data.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Field-wise linear interpolation between two boxes.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn mix(a: f64, b: f64, t: f64) -> f64 {
            a + (b - a) * t
        }

        Self {
            cx: mix(a.cx, b.cx, t),
            cy: mix(a.cy, b.cy, t),
            width: mix(a.width, b.width, t),
            height: mix(a.height, b.height, t),
            angle: mix(a.angle, b.angle, t),
        }
    }

    /// Axis-aligned bounds around the center, ignoring rotation.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.cx - self.width / 2.0,
            self.cy - self.height / 2.0,
            self.cx + self.width / 2.0,
            self.cy + self.height / 2.0,
        )
    }

    /// Rotation about the box center, for placing content in the
    /// compositing pipeline's coordinate space.
    pub fn to_affine(&self) -> Affine {
        let center = Vec2::new(self.cx, self.cy);
        Affine::translate(center)
            * Affine::rotate(self.angle.to_radians())
            * Affine::translate(-center)
    }

    /// Structured-value form with the five named fields.
    pub fn json_value(&self) -> Value {
        json!({
            "cx": self.cx,
            "cy": self.cy,
            "width": self.width,
            "height": self.height,
            "angle": self.angle,
        })
    }

    /// JSON string form of [`BBox::json_value`].
    pub fn json(&self) -> String {
        self.json_value().to_string()
    }

    /// Apply a structured value, updating only the fields present in it.
    ///
    /// Absent or null keys leave the current value unchanged; a present key
    /// that is not a number is a [`TrackboxError::Serde`] failure.
    pub fn set_json_value(&mut self, root: &Value) -> TrackboxResult<()> {
        if let Some(v) = number_field(root, "cx")? {
            self.cx = v;
        }
        if let Some(v) = number_field(root, "cy")? {
            self.cy = v;
        }
        if let Some(v) = number_field(root, "width")? {
            self.width = v;
        }
        if let Some(v) = number_field(root, "height")? {
            self.height = v;
        }
        if let Some(v) = number_field(root, "angle")? {
            self.angle = v;
        }
        Ok(())
    }

    /// Parse a JSON string and apply it via [`BBox::set_json_value`].
    pub fn set_json(&mut self, text: &str) -> TrackboxResult<()> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| TrackboxError::serde(format!("invalid box JSON: {e}")))?;
        self.set_json_value(&root)
    }
}

fn number_field(root: &Value, key: &str) -> TrackboxResult<Option<f64>> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| TrackboxError::serde(format!("'{key}' must be a number"))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/bbox.rs"]
mod tests;
