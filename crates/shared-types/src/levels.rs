//! # Assurance Levels and Modes
//!
//! IAL and AAL are decimal tiers. They are stored as `f64` and compared
//! against the fixed tables below with a small tolerance.

use serde::Serializer;

/// Valid identity assurance levels.
pub const VALID_IAL: [f64; 7] = [1.1, 1.2, 1.3, 2.1, 2.2, 2.3, 3.0];

/// Valid authenticator assurance levels.
pub const VALID_AAL: [f64; 4] = [1.0, 2.1, 2.2, 3.0];

/// Valid consent modes.
pub const VALID_MODES: [u8; 3] = [1, 2, 3];

/// Mode list used for purposes with no explicit allow-list.
pub const DEFAULT_ALLOWED_MODES: [u8; 3] = [1, 2, 3];

const EPSILON: f64 = 1e-9;

fn in_table(table: &[f64], value: f64) -> bool {
    table.iter().any(|v| (v - value).abs() < EPSILON)
}

/// Whether `value` is one of [`VALID_IAL`].
pub fn is_valid_ial(value: f64) -> bool {
    in_table(&VALID_IAL, value)
}

/// Whether `value` is one of [`VALID_AAL`].
pub fn is_valid_aal(value: f64) -> bool {
    in_table(&VALID_AAL, value)
}

/// Whether `value` is one of [`VALID_MODES`].
pub fn is_valid_mode(value: u8) -> bool {
    VALID_MODES.contains(&value)
}

/// Whether `modes` is non-empty, duplicate-free and every entry valid.
pub fn is_valid_mode_list(modes: &[u8]) -> bool {
    if modes.is_empty() || !modes.iter().all(|m| is_valid_mode(*m)) {
        return false;
    }
    let mut sorted = modes.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len() == modes.len()
}

/// `a <= b` with tolerance.
pub fn level_le(a: f64, b: f64) -> bool {
    a <= b + EPSILON
}

/// Render a level as an integer when whole (`3`, not `3.0`).
pub fn serialize_level<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
