//! Closed-form magnetometry displacement formulas for thin ferromagnetic
//! disks in the vortex state.
//!
//! The vortex core of a soft-magnetic disk displaces linearly with a small
//! in-plane field: `d = chi * R * B / (mu0 * Ms)`, with the in-plane
//! susceptibility `chi` given by the rigid-vortex expression
//! `chi(beta) = 4 pi / (2 beta (ln 8 - ln beta - 1/2))` for aspect ratio
//! `beta = thickness / radius`. All quantities are SI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 4 pi rounded the way the companion mumax runs normalize it.
const FOUR_PI: f64 = 12.56;

/// Vacuum permeability, H/m, on the same rounding.
pub const MU_0: f64 = FOUR_PI * 1e-7;

/// Largest aspect ratio the rigid-vortex susceptibility is valid for:
/// the log term changes sign at `beta = 8 / sqrt(e)`.
pub fn beta_limit() -> f64 {
    8.0 * (-0.5f64).exp()
}

#[derive(Debug, Error, PartialEq)]
pub enum MagnetoError {
    #[error("disk radius and thickness must be positive (radius {radius}, thickness {thickness})")]
    NonPositiveDisk { radius: f64, thickness: f64 },

    #[error("aspect ratio {beta} outside (0, {limit:.4})")]
    AspectRatioOutOfRange { beta: f64, limit: f64 },
}

/// Geometry of one disk, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub radius: f64,
    pub thickness: f64,
}

impl Disk {
    pub fn new(radius: f64, thickness: f64) -> Result<Self, MagnetoError> {
        if !(radius > 0.0) || !(thickness > 0.0) {
            return Err(MagnetoError::NonPositiveDisk { radius, thickness });
        }
        Ok(Disk { radius, thickness })
    }

    /// Thickness-to-radius aspect ratio, `beta`.
    pub fn aspect_ratio(&self) -> f64 {
        self.thickness / self.radius
    }
}

/// In-plane susceptibility of a thin disk with aspect ratio `beta`.
pub fn susceptibility(beta: f64) -> Result<f64, MagnetoError> {
    let limit = beta_limit();
    if !(beta > 0.0 && beta < limit) {
        return Err(MagnetoError::AspectRatioOutOfRange { beta, limit });
    }
    Ok(FOUR_PI / (2.0 * beta * (8.0f64.ln() - beta.ln() - 0.5)))
}

/// Vortex-core displacement per unit field, m/T: `chi * R / (mu0 * Ms)`.
///
/// `msat` is the saturation magnetization in A/m and must be positive.
pub fn displacement_slope(disk: &Disk, msat: f64, chi: f64) -> f64 {
    chi * disk.radius / (MU_0 * msat)
}

/// Vortex-core displacement in metres for an in-plane field `b_field`
/// (Tesla).
pub fn displacement(disk: &Disk, msat: f64, chi: f64, b_field: f64) -> f64 {
    displacement_slope(disk, msat, chi) * b_field
}

#[cfg(test)]
mod tests {
    use super::*;

    // The 80 nm thick, 0.5 um radius permalloy disk of the companion
    // simulations, with the 0.55 empirical aspect-ratio correction.
    const MSAT: f64 = 860_000.0;

    fn reference_disk() -> Disk {
        Disk::new(0.5e-6, 80e-9).unwrap()
    }

    #[test]
    fn test_reference_susceptibility() {
        let beta = reference_disk().aspect_ratio() * 0.55;
        assert!((beta - 0.088).abs() < 1e-12);
        let chi = susceptibility(beta).unwrap();
        assert!((chi - 17.7967).abs() < 1e-3);
    }

    #[test]
    fn test_reference_slope() {
        let disk = reference_disk();
        let chi = susceptibility(disk.aspect_ratio() * 0.55).unwrap();
        let slope = displacement_slope(&disk, MSAT, chi);
        // 8.238e-6 m/T, i.e. ~8.2 nm per mT.
        assert!((slope - 8.238e-6).abs() < 1e-8);
    }

    #[test]
    fn test_displacement_linear_in_field() {
        let disk = reference_disk();
        let chi = susceptibility(disk.aspect_ratio() * 0.55).unwrap();
        let d1 = displacement(&disk, MSAT, chi, 1e-3);
        let d5 = displacement(&disk, MSAT, chi, 5e-3);
        assert!((d5 - 5.0 * d1).abs() < 1e-18);
        assert!((d1 - 8.238e-9).abs() < 1e-11);
    }

    #[test]
    fn test_susceptibility_positive_over_domain() {
        for beta in [0.01, 0.088, 0.5, 1.0, 4.0] {
            assert!(susceptibility(beta).unwrap() > 0.0);
        }
    }

    #[test]
    fn test_aspect_ratio_domain() {
        assert!(matches!(
            susceptibility(0.0),
            Err(MagnetoError::AspectRatioOutOfRange { .. })
        ));
        assert!(matches!(
            susceptibility(-1.0),
            Err(MagnetoError::AspectRatioOutOfRange { .. })
        ));
        assert!(matches!(
            susceptibility(5.0),
            Err(MagnetoError::AspectRatioOutOfRange { .. })
        ));
        // Just inside the limit is still accepted.
        assert!(susceptibility(beta_limit() - 1e-9).is_ok());
    }

    #[test]
    fn test_disk_validation() {
        assert!(Disk::new(0.0, 80e-9).is_err());
        assert!(Disk::new(0.5e-6, -1.0).is_err());
        let disk = Disk::new(1e-6, 80e-9).unwrap();
        assert!((disk.aspect_ratio() - 0.08).abs() < 1e-15);
    }
}
