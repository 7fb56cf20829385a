//! Per-primitive shader parameters.
//!
//! Visuals are stored as index-aligned columns: entry `i` of every column belongs
//! to the primitive whose vertices carry `primitive_id == i`.

mod binder;
mod property;
mod store;
mod visual;

pub use binder::ParameterBinder;
pub use property::{PropertySet, ShaderProperty};
pub use store::{PropertyBlock, PropertyStore, PropertyValues};
pub use visual::{PrimitiveVisual, VisualColumns};
