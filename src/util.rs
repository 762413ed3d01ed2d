/*
 * Trivial to understand utility functions that need not clutter other namespaces.
 */
use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

/// Reads a file into a Vec of f32s.
pub fn read_file_as_f32s(filename: &str) -> Result<Vec<f32>, String> {
    let f = File::open(filename).map_err(|e| format!("cannot open \"{}\": {}", filename, e))?;
    let mut reader = BufReader::new(f);

    // Iterate the file into f32s
    let mut floats: Vec<f32> = Vec::new();
    while let Ok(f) = reader.read_f32::<BigEndian>() {
        floats.push(f);
    }
    Ok(floats)
}

/// Reads a file into a Vec of f32s and verifies that the byte-count of the
/// input file matches with the expected amount of f32s.
pub fn read_file_as_f32s_checked(filename: &str, expected_len: usize) -> Result<Vec<f32>, String> {
    let v = read_file_as_f32s(filename)?;
    let len = v.len();
    if len != expected_len {
        return Err(format!(
            "expected {} f32s to be read from \"{}\", but {} were read",
            expected_len, filename, len
        ));
    }
    Ok(v)
}

/// Compares two buffers element-wise within a margin; panics with the first
/// offending index on mismatch. Test support.
pub fn verify(output: &[f32], correct: &[f32], margin: f32) {
    assert_eq!(
        output.len(),
        correct.len(),
        "output length {} does not match expected length {}",
        output.len(),
        correct.len()
    );
    for (idx, (&out, &corr)) in output.iter().zip(correct.iter()).enumerate() {
        assert!(
            (out - corr).abs() <= margin,
            "element {}: {} differs from expected {} by more than {}",
            idx,
            out,
            corr,
            margin
        );
    }
}

/// Like `verify` but returns the result instead of panicking.
pub fn is_within_margin(a: &[f32], b: &[f32], margin: f32) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= margin)
}

/// Seconds elapsed between two instants.
pub fn duration_between(start: Instant, end: Instant) -> f64 {
    let duration = end.duration_since(start);
    duration.as_secs() as f64 + f64::from(duration.subsec_nanos()) / 1_000_000_000f64
}
