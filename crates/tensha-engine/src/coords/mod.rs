//! Coordinate and geometry types.
//!
//! Two spaces are involved:
//! - screen space: pixels, origin at the viewport's bottom-left corner, +Y up
//!   (callers on a top-left-origin windowing system flip Y before handing rects in)
//! - world space: camera units, origin at the viewport center, +Y up
//!
//! `CoordinateMapper` converts between the two for one immutable `Viewport` snapshot.

mod corner_radii;
mod mapper;
mod rect;
mod vec2;
mod viewport;

pub use corner_radii::CornerRadii;
pub use mapper::CoordinateMapper;
pub use rect::ScreenRect;
pub use vec2::Vec2;
pub use viewport::Viewport;
