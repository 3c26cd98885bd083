#![forbid(unsafe_code)]

//! Input model and normalization for bounded-interval dot plots.
//!
//! Raw items carry an optional lower and upper bound. [`normalize`] turns them into
//! [`NormalizedRecord`]s with a midpoint and sign-based color tokens; layout and rendering live
//! in `dotplot-render`.

pub mod color;
pub mod error;
pub mod geom;
pub mod model;
pub mod normalize;

pub use color::{ColorClassifier, ColorPalette, ColorToken, SignColorClassifier};
pub use error::{Error, Result};
pub use model::{DotColors, NormalizedRecord, RawBounds, RawItem};
pub use normalize::{normalize, normalize_item, parse_items};

#[cfg(test)]
mod tests;
