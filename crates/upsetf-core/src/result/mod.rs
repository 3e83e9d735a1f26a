//! Allocation output and its UpSet shaping.

mod intersection;
mod upset;

pub use intersection::IntersectionResult;
pub use upset::{SetTotal, UpsetRow, UpsetTable};
