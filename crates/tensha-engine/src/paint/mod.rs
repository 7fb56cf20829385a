//! Paint model for panel fills and outlines.

pub mod color;

pub use color::Color;
