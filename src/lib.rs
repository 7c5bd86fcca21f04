//! Conversion of tabulated structural-model exports into analysis-ready
//! cross-section descriptions: polygon geometry for rendering and meshing,
//! and numerically integrated stiffness properties for frame elements.

pub mod convert;
pub mod error;
pub mod geometry;
pub mod math;
pub mod section;
pub mod table;

pub use error::{CrosecError, Result};
