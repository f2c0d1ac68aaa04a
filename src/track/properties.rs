use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{Value, json};

use crate::{
    animation::curve::Curve,
    foundation::core::{Fps, FrameIndex},
    foundation::error::{TrackboxError, TrackboxResult},
    track::object::TrackedBox,
};

/// Capability of keyframe-bearing objects the compositing pipeline can drive
/// generically: flattened per-frame property values plus time rescaling.
pub trait PropertySource {
    /// Property name to scalar value for the effective box and every
    /// adjustment curve at `frame`.
    fn box_values(&self, frame: FrameIndex) -> BTreeMap<String, f64>;

    /// Update the time-scale factor consulted by subsequent queries.
    fn scale_points(&mut self, scale: f64);
}

impl PropertySource for TrackedBox {
    fn box_values(&self, frame: FrameIndex) -> BTreeMap<String, f64> {
        let b = self.get_box(frame);
        let mut values = BTreeMap::new();
        values.insert("cx".to_string(), b.cx);
        values.insert("cy".to_string(), b.cy);
        values.insert("width".to_string(), b.width);
        values.insert("height".to_string(), b.height);
        values.insert("angle".to_string(), b.angle);
        values.insert("delta_x".to_string(), self.delta_x.value_at(frame));
        values.insert("delta_y".to_string(), self.delta_y.value_at(frame));
        values.insert("scale_x".to_string(), self.scale_x.value_at(frame));
        values.insert("scale_y".to_string(), self.scale_y.value_at(frame));
        values.insert("rotation".to_string(), self.rotation.value_at(frame));
        values
    }

    fn scale_points(&mut self, scale: f64) {
        TrackedBox::scale_points(self, scale);
    }
}

impl TrackedBox {
    /// Structured export of the aggregate: visibility, base frame rate, time
    /// scale, source path, and the five curves.
    ///
    /// The timeline itself is not inlined; it is reconstructed from the
    /// recorded source path via [`TrackedBox::load_box_data`].
    pub fn json_value(&self) -> Value {
        json!({
            "visible": self.visible,
            "base_fps": { "num": self.base_fps.num, "den": self.base_fps.den },
            "time_scale": self.time_scale,
            "source_path": self.source_path().map(|p| p.display().to_string()),
            "delta_x": curve_value(&self.delta_x),
            "delta_y": curve_value(&self.delta_y),
            "scale_x": curve_value(&self.scale_x),
            "scale_y": curve_value(&self.scale_y),
            "rotation": curve_value(&self.rotation),
        })
    }

    /// JSON string form of [`TrackedBox::json_value`].
    pub fn json(&self) -> String {
        self.json_value().to_string()
    }

    /// Parse a JSON string and apply it via [`TrackedBox::set_json_value`].
    ///
    /// Any parse failure surfaces as the single [`TrackboxError::Serde`]
    /// failure kind, independent of the underlying parser.
    pub fn set_json(&mut self, text: &str) -> TrackboxResult<()> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| TrackboxError::serde(format!("invalid JSON: {e}")))?;
        self.set_json_value(&root)
    }

    /// Apply a structured value, updating only the fields present in it.
    ///
    /// Keys absent from the input leave the corresponding state unchanged; a
    /// present key with the wrong type is a [`TrackboxError::Serde`] failure,
    /// and a non-positive `time_scale` is rejected as validation.
    pub fn set_json_value(&mut self, root: &Value) -> TrackboxResult<()> {
        if let Some(v) = root.get("visible") {
            self.visible = v
                .as_bool()
                .ok_or_else(|| TrackboxError::serde("'visible' must be a boolean"))?;
        }

        if let Some(v) = root.get("base_fps") {
            let num = fps_part(v, "num")?;
            let den = fps_part(v, "den")?;
            self.set_base_fps(Fps::new(num, den)?);
        }

        if let Some(v) = root.get("time_scale") {
            let scale = v
                .as_f64()
                .ok_or_else(|| TrackboxError::serde("'time_scale' must be a number"))?;
            if !scale.is_finite() || scale <= 0.0 {
                return Err(TrackboxError::validation("time_scale must be > 0"));
            }
            self.time_scale = scale;
        }

        if let Some(v) = root.get("source_path") {
            self.source_path = match v {
                Value::Null => None,
                Value::String(s) => Some(PathBuf::from(s)),
                _ => return Err(TrackboxError::serde("'source_path' must be a string")),
            };
        }

        set_curve(&mut self.delta_x, root, "delta_x")?;
        set_curve(&mut self.delta_y, root, "delta_y")?;
        set_curve(&mut self.scale_x, root, "scale_x")?;
        set_curve(&mut self.scale_y, root, "scale_y")?;
        set_curve(&mut self.rotation, root, "rotation")?;

        Ok(())
    }

    /// Flattened view of every editable property evaluated at `frame`, for
    /// generic UI binding.
    pub fn properties_json(&self, frame: FrameIndex) -> Value {
        json!({
            "visible": property_json(
                "Visible",
                if self.visible { 1.0 } else { 0.0 },
                "bool", "", None, 0.0, 1.0, false, frame,
            ),
            "delta_x": property_json(
                "Delta X", self.delta_x.value_at(frame),
                "float", "", Some(&self.delta_x), -10_000.0, 10_000.0, false, frame,
            ),
            "delta_y": property_json(
                "Delta Y", self.delta_y.value_at(frame),
                "float", "", Some(&self.delta_y), -10_000.0, 10_000.0, false, frame,
            ),
            "scale_x": property_json(
                "Scale X", self.scale_x.value_at(frame),
                "float", "", Some(&self.scale_x), 0.0, 100.0, false, frame,
            ),
            "scale_y": property_json(
                "Scale Y", self.scale_y.value_at(frame),
                "float", "", Some(&self.scale_y), 0.0, 100.0, false, frame,
            ),
            "rotation": property_json(
                "Rotation", self.rotation.value_at(frame),
                "float", "", Some(&self.rotation), -360.0, 360.0, false, frame,
            ),
        })
    }
}

fn curve_value(curve: &Curve) -> Value {
    serde_json::to_value(curve).unwrap_or(Value::Null)
}

fn set_curve(slot: &mut Curve, root: &Value, key: &str) -> TrackboxResult<()> {
    if let Some(v) = root.get(key) {
        *slot = serde_json::from_value(v.clone())
            .map_err(|e| TrackboxError::serde(format!("invalid '{key}' curve: {e}")))?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn property_json(
    name: &str,
    value: f64,
    kind: &str,
    memo: &str,
    curve: Option<&Curve>,
    min: f64,
    max: f64,
    readonly: bool,
    frame: FrameIndex,
) -> Value {
    json!({
        "name": name,
        "value": value,
        "type": kind,
        "memo": memo,
        "min": min,
        "max": max,
        "readonly": readonly,
        "keyframe": curve.is_some_and(|c| c.contains(frame)),
        "points": curve.map_or(0, Curve::len),
    })
}

fn fps_part(v: &Value, key: &str) -> TrackboxResult<u32> {
    let part = v
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| TrackboxError::serde(format!("'base_fps.{key}' must be an integer")))?;
    u32::try_from(part)
        .map_err(|_| TrackboxError::serde(format!("'base_fps.{key}' is out of range")))
}

#[cfg(test)]
#[path = "../../tests/unit/track/properties.rs"]
mod tests;
