use std::path::Path;

use crate::foundation::{
    core::FrameIndex,
    error::{TrackboxError, TrackboxResult},
};

/// One decoded tracker record: the box observed at one source frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedRecord {
    /// 1-based source frame the box was observed at.
    pub frame: FrameIndex,
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

const MAGIC: &[u8; 4] = b"TBXD";
const VERSION: u32 = 1;
// u64 frame + five f32 fields.
const RECORD_SIZE: usize = 8 + 5 * 4;

/// Read and decode a tracker data file.
pub fn read_records(path: &Path) -> TrackboxResult<Vec<TrackedRecord>> {
    let bytes = std::fs::read(path).map_err(|e| {
        TrackboxError::decode(format!(
            "failed to read tracker data '{}': {e}",
            path.display()
        ))
    })?;
    decode_records(&bytes)
}

/// Decode an in-memory tracker data stream.
///
/// Layout (little-endian): magic `TBXD`, `u32` version, `u64` record count,
/// then per record a `u64` frame number and five `f32` box fields. Frame
/// numbers must be 1-based and non-decreasing.
pub fn decode_records(bytes: &[u8]) -> TrackboxResult<Vec<TrackedRecord>> {
    let mut r = Reader { buf: bytes, pos: 0 };

    if r.take(4)? != MAGIC {
        return Err(TrackboxError::decode("tracker data has an unknown header"));
    }
    let version = r.u32_le()?;
    if version != VERSION {
        return Err(TrackboxError::decode(format!(
            "unsupported tracker data version {version}"
        )));
    }

    let count = r.u64_le()?;
    let expected = (count as usize).checked_mul(RECORD_SIZE);
    if expected != Some(r.remaining()) {
        return Err(TrackboxError::decode(
            "tracker data length does not match its record count",
        ));
    }

    let mut out = Vec::with_capacity(count as usize);
    let mut prev = 0u64;
    for _ in 0..count {
        let frame = r.u64_le()?;
        if frame == 0 {
            return Err(TrackboxError::decode("frame numbers are 1-based"));
        }
        if frame < prev {
            return Err(TrackboxError::decode(
                "records must be in non-decreasing frame order",
            ));
        }
        prev = frame;

        out.push(TrackedRecord {
            frame: FrameIndex(frame),
            cx: f64::from(r.f32_le()?),
            cy: f64::from(r.f32_le()?),
            width: f64::from(r.f32_le()?),
            height: f64::from(r.f32_le()?),
            angle: f64::from(r.f32_le()?),
        });
    }

    Ok(out)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> TrackboxResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(TrackboxError::decode("tracker data is truncated"));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u32_le(&mut self) -> TrackboxResult<u32> {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(b))
    }

    fn u64_le(&mut self) -> TrackboxResult<u64> {
        let mut b = [0u8; 8];
        b.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(b))
    }

    fn f32_le(&mut self) -> TrackboxResult<f32> {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.take(4)?);
        Ok(f32::from_le_bytes(b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/data.rs"]
mod tests;
