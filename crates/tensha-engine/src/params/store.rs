use std::collections::HashMap;

/// Destination for named per-primitive arrays (the shader-facing property store).
///
/// Each call replaces the whole array stored under `name`.
pub trait PropertyStore {
    fn set_vector_array(&mut self, name: &str, values: &[[f32; 4]]);
    fn set_float_array(&mut self, name: &str, values: &[f32]);
}

/// One stored array.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValues {
    Vectors(Vec<[f32; 4]>),
    Floats(Vec<f32>),
}

impl PropertyValues {
    pub fn len(&self) -> usize {
        match self {
            PropertyValues::Vectors(v) => v.len(),
            PropertyValues::Floats(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory property store handed to the render backend with each draw.
///
/// `revision` increments on every write so backends can skip re-uploads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBlock {
    values: HashMap<String, PropertyValues>,
    revision: u64,
}

impl PropertyBlock {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValues> {
        self.values.get(name)
    }

    pub fn vector_array(&self, name: &str) -> Option<&[[f32; 4]]> {
        match self.values.get(name)? {
            PropertyValues::Vectors(v) => Some(v),
            PropertyValues::Floats(_) => None,
        }
    }

    pub fn float_array(&self, name: &str) -> Option<&[f32]> {
        match self.values.get(name)? {
            PropertyValues::Floats(v) => Some(v),
            PropertyValues::Vectors(_) => None,
        }
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of named arrays stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn store(&mut self, name: &str, values: PropertyValues) {
        // Reuse the key allocation on overwrite.
        match self.values.get_mut(name) {
            Some(slot) => *slot = values,
            None => {
                self.values.insert(name.to_owned(), values);
            }
        }
        self.revision = self.revision.wrapping_add(1);
    }
}

impl PropertyStore for PropertyBlock {
    fn set_vector_array(&mut self, name: &str, values: &[[f32; 4]]) {
        self.store(name, PropertyValues::Vectors(values.to_vec()));
    }

    fn set_float_array(&mut self, name: &str, values: &[f32]) {
        self.store(name, PropertyValues::Floats(values.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_replace_previous_array() {
        let mut block = PropertyBlock::new();
        block.set_float_array("OutlineWidth", &[1.0, 2.0, 3.0]);
        block.set_float_array("OutlineWidth", &[4.0]);
        assert_eq!(block.float_array("OutlineWidth"), Some(&[4.0][..]));
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn typed_lookup_rejects_wrong_kind() {
        let mut block = PropertyBlock::new();
        block.set_vector_array("FillColor", &[[1.0, 0.0, 0.0, 1.0]]);
        assert!(block.float_array("FillColor").is_none());
        assert_eq!(block.vector_array("FillColor").map(<[_]>::len), Some(1));
        assert!(block.vector_array("Missing").is_none());
    }

    #[test]
    fn revision_advances_on_every_write() {
        let mut block = PropertyBlock::new();
        let r0 = block.revision();
        block.set_float_array("OutlineDirection", &[0.0]);
        block.set_float_array("OutlineDirection", &[0.0]);
        assert_eq!(block.revision(), r0 + 2);
    }
}
