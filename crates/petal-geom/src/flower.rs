use log::debug;

use crate::device::Device;
use crate::petal::{circle_outline, petal_outline, FlowerSpec};
use crate::GeomError;

impl Device {
    /// Attach one petal, rotated by `rotation` degrees about the origin
    /// and translated to the spec's center.
    pub fn add_petal(&mut self, spec: &FlowerSpec, rotation: f64) -> Result<&mut Self, GeomError> {
        let outline = petal_outline(spec)?;
        self.push(outline.rotated(rotation).translated(spec.center));
        Ok(self)
    }

    /// Attach a full flower: a center disk of radius `inner_radius / 2`
    /// plus `n_petals` petals at `i * 360 / n_petals` degrees.
    ///
    /// Validation runs before anything is attached, so a failed call
    /// leaves the device untouched. A zero inner radius produces no disk.
    pub fn add_flower(&mut self, spec: &FlowerSpec) -> Result<&mut Self, GeomError> {
        spec.validate()?;
        debug!(
            "flower: {} petals, r {}..{} at ({}, {})",
            spec.n_petals, spec.inner_radius, spec.outer_radius, spec.center.x, spec.center.y
        );

        let disk_radius = spec.inner_radius / 2.0;
        if disk_radius > 0.0 {
            self.push(circle_outline(disk_radius, &spec.tessellation).translated(spec.center));
        }
        let pitch = 360.0 / spec.n_petals as f64;
        for i in 0..spec.n_petals {
            self.add_petal(spec, i as f64 * pitch)?;
        }
        Ok(self)
    }
}
