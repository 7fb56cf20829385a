use std::fmt;

/// Errors raised while building or binding a panel batch.
///
/// Every variant is a precondition violation: the failing call returns before any
/// geometry or parameter state is replaced, so the last good batch stays renderable.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchError {
    /// The viewport has no usable area: a zero, negative or non-finite pixel size,
    /// or a non-positive ortho half-height.
    DegenerateViewport { pixel_width: f32, pixel_height: f32 },

    /// `rects` and outline inputs given to the mesh builder differ in length.
    ShapeMismatch { rects: usize, outlines: usize },

    /// A per-primitive parameter column does not match the primitive count.
    FieldLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A per-primitive update addressed a primitive that does not exist.
    PrimitiveOutOfRange { index: usize, len: usize },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::DegenerateViewport { pixel_width, pixel_height } => write!(
                f,
                "degenerate viewport: {pixel_width}x{pixel_height} px has no usable area"
            ),
            BatchError::ShapeMismatch { rects, outlines } => write!(
                f,
                "shape mismatch: {rects} rects but {outlines} outline entries"
            ),
            BatchError::FieldLengthMismatch { field, expected, actual } => write!(
                f,
                "field length mismatch: `{field}` has {actual} entries, expected {expected}"
            ),
            BatchError::PrimitiveOutOfRange { index, len } => {
                write!(f, "primitive {index} out of range (batch has {len})")
            }
        }
    }
}

impl std::error::Error for BatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_field() {
        let err = BatchError::FieldLengthMismatch { field: "outline_width_px", expected: 4, actual: 3 };
        let msg = err.to_string();
        assert!(msg.contains("outline_width_px"));
        assert!(msg.contains('4') && msg.contains('3'));
    }

    #[test]
    fn display_shape_mismatch() {
        let err = BatchError::ShapeMismatch { rects: 2, outlines: 5 };
        assert_eq!(err.to_string(), "shape mismatch: 2 rects but 5 outline entries");
    }
}
