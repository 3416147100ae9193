//! Procedural petal-flower geometry for nanofabrication mask layout.
//!
//! A [`Device`] is the in-memory aggregate of placed polygons for one
//! layout run. Flowers (a center disk plus `n` petals at `i * 360 / n`
//! degrees) are attached to it through [`Device::add_flower`], with the
//! petal outline selected by [`PetalStyle`]. Export and preview live in
//! sibling crates; this crate does no I/O.

use thiserror::Error;

mod device;
mod flower;
mod petal;
mod point;

pub use device::{BoundingBox, Device, Polygon};
pub use petal::{circle_outline, petal_outline, Compensation, FlowerSpec, PetalStyle, Tessellation};
pub use point::Point;

/// Errors for invalid flower/petal parameter combinations.
///
/// Construction is fail-fast: the first violated invariant aborts the
/// build before anything is attached to the device.
#[derive(Debug, Error, PartialEq)]
pub enum GeomError {
    #[error("flower must have at least one petal")]
    ZeroPetalCount,

    #[error("outer radius must exceed inner radius (inner {inner}, outer {outer})")]
    RadiusOrder { inner: f64, outer: f64 },

    #[error("centerline arc radius must be positive (got {arc_radius})")]
    NonPositiveArcRadius { arc_radius: f64 },

    #[error("petal rotation must be in (0, 360] degrees (got {degrees})")]
    PetalRotationOutOfRange { degrees: f64 },

    #[error("petal centerline subtends {degrees:.1} degrees, more than a full turn")]
    ArcSpanTooLarge { degrees: f64 },

    #[error("compensation factors must be positive (got {factor})")]
    InvalidCompensation { factor: f64 },

    #[error("compensated centerline has non-positive length {length}")]
    CenterlineCollapsed { length: f64 },
}
