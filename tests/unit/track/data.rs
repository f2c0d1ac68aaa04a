use super::*;
use crate::track::object::TrackedBox;

fn encode(records: &[(u64, [f32; 5])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(records.len() as u64).to_le_bytes());
    for (frame, fields) in records {
        out.extend_from_slice(&frame.to_le_bytes());
        for f in fields {
            out.extend_from_slice(&f.to_le_bytes());
        }
    }
    out
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("trackbox-{}-{name}", std::process::id()))
}

#[test]
fn decode_round_trip() {
    let bytes = encode(&[
        (1, [0.0, 0.0, 10.0, 10.0, 0.0]),
        (5, [25.0, 5.0, 10.0, 10.0, 45.0]),
        (9, [50.0, 10.0, 12.0, 8.0, 90.0]),
    ]);
    let records = decode_records(&bytes).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].frame, FrameIndex(1));
    assert_eq!(records[1].cx, 25.0);
    assert_eq!(records[2].angle, 90.0);
}

#[test]
fn decode_accepts_an_empty_stream() {
    let records = decode_records(&encode(&[])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = encode(&[(1, [0.0; 5])]);
    bytes[0] = b'X';
    let err = decode_records(&bytes).unwrap_err();
    assert!(matches!(err, TrackboxError::Decode(_)));
    assert!(err.to_string().contains("unknown header"));
}

#[test]
fn rejects_unsupported_version() {
    let mut bytes = encode(&[(1, [0.0; 5])]);
    bytes[4] = 9;
    let err = decode_records(&bytes).unwrap_err();
    assert!(err.to_string().contains("version"));
}

#[test]
fn rejects_truncated_streams() {
    let bytes = encode(&[(1, [0.0; 5]), (2, [1.0; 5])]);
    for cut in [3, 10, 17, bytes.len() - 1] {
        let err = decode_records(&bytes[..cut]).unwrap_err();
        assert!(matches!(err, TrackboxError::Decode(_)), "cut at {cut}");
    }
}

#[test]
fn rejects_record_count_mismatch() {
    let mut bytes = encode(&[(1, [0.0; 5])]);
    // Claim two records while carrying one.
    bytes[8..16].copy_from_slice(&2u64.to_le_bytes());
    let err = decode_records(&bytes).unwrap_err();
    assert!(err.to_string().contains("record count"));
}

#[test]
fn rejects_decreasing_frame_order() {
    let bytes = encode(&[(5, [0.0; 5]), (2, [0.0; 5])]);
    let err = decode_records(&bytes).unwrap_err();
    assert!(err.to_string().contains("non-decreasing"));
}

#[test]
fn rejects_zero_frame_numbers() {
    let bytes = encode(&[(0, [0.0; 5])]);
    assert!(decode_records(&bytes).is_err());
}

#[test]
fn read_records_missing_file_is_a_decode_error() {
    let err = read_records(&temp_path("does-not-exist.tbx")).unwrap_err();
    assert!(matches!(err, TrackboxError::Decode(_)));
}

#[test]
fn load_box_data_populates_the_timeline() {
    let bytes = encode(&[
        (1, [0.0, 0.0, 10.0, 10.0, 0.0]),
        (11, [100.0, 0.0, 10.0, 10.0, 0.0]),
    ]);
    let path = temp_path("load-ok.tbx");
    std::fs::write(&path, bytes).unwrap();

    let mut tb = TrackedBox::new();
    assert!(tb.load_box_data(&path));
    assert_eq!(tb.len(), 2);
    assert!(tb.contains(FrameIndex(1)));
    assert!(tb.contains(FrameIndex(11)));
    assert_eq!(tb.source_path(), Some(path.as_path()));

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_box_data_missing_path_returns_false_and_leaves_state_alone() {
    let mut tb = TrackedBox::new();
    assert!(!tb.load_box_data(&temp_path("missing.tbx")));
    assert!(tb.is_empty());
    assert!(tb.source_path().is_none());
}

#[test]
fn load_box_data_corrupt_file_returns_false_and_leaves_state_alone() {
    let path = temp_path("corrupt.tbx");
    std::fs::write(&path, b"garbage").unwrap();

    let mut tb = TrackedBox::new();
    tb.add_box(FrameIndex(1), 1.0, 1.0, 1.0, 1.0, 0.0);
    assert!(!tb.load_box_data(&path));
    assert_eq!(tb.len(), 1);
    assert!(tb.source_path().is_none());

    std::fs::remove_file(&path).ok();
}
