//! GDSII export for [`petal_geom::Device`] aggregates.
//!
//! The heavy lifting (record encoding, file format) is delegated to the
//! `gds21` crate; this crate only converts a device's polygons into a
//! single-cell `GdsLibrary`, snapping coordinates onto the database grid
//! implied by the caller's unit/precision choice.

use std::path::Path;

use gds21::{GdsBoundary, GdsElement, GdsLibrary, GdsPoint, GdsStruct, GdsUnits};
use log::debug;
use petal_geom::Device;
use thiserror::Error;

/// Pass-through parameters for the GDS writer.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Size of one user unit, in metres. Layout coordinates are expressed
    /// in user units (1e-9: nanometres).
    pub unit: f64,
    /// Size of one database unit, in metres. This is the grid coordinates
    /// are snapped to.
    pub precision: f64,
    /// Rewrite illegal or over-long cell names instead of failing.
    pub auto_rename: bool,
    /// Maximum length of a cell name.
    pub max_cellname_length: usize,
    /// Name of the top-level cell.
    pub cellname: String,
    /// GDS layer number for every polygon.
    pub layer: i16,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            unit: 1e-9,
            precision: 1e-9,
            auto_rename: true,
            max_cellname_length: 28,
            cellname: "toplevel".to_string(),
            layer: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    // gds21's error type is not Send + Sync, so only its message is kept.
    #[error("gds error: {0}")]
    Gds(String),

    #[error("unit and precision must be positive and finite (unit {unit}, precision {precision})")]
    InvalidUnits { unit: f64, precision: f64 },

    #[error("maximum cell-name length must be at least 1")]
    InvalidNameLimit,

    #[error("cell name {name:?} is not a legal GDS identifier")]
    BadCellName { name: String },

    #[error("coordinate {value} does not fit the database grid")]
    CoordinateOverflow { value: f64 },

    #[error("polygon with {vertices} vertices cannot form a boundary")]
    DegeneratePolygon { vertices: usize },
}

/// Convert a device into a single-cell GDS library.
pub fn to_library(device: &Device, opts: &WriteOptions) -> Result<GdsLibrary, ExportError> {
    if !(opts.unit > 0.0 && opts.unit.is_finite())
        || !(opts.precision > 0.0 && opts.precision.is_finite())
    {
        return Err(ExportError::InvalidUnits {
            unit: opts.unit,
            precision: opts.precision,
        });
    }
    if opts.max_cellname_length == 0 {
        return Err(ExportError::InvalidNameLimit);
    }

    // Database units per user unit.
    let scale = opts.unit / opts.precision;

    let mut lib = GdsLibrary::new(cell_name(device.name(), opts)?);
    lib.units = GdsUnits::new(opts.precision / opts.unit, opts.precision);

    let mut cell = GdsStruct::new(cell_name(&opts.cellname, opts)?);
    for polygon in device.polygons() {
        let points = polygon.points();
        if points.len() < 3 {
            return Err(ExportError::DegeneratePolygon {
                vertices: points.len(),
            });
        }
        let mut xy = Vec::with_capacity(points.len() + 1);
        for p in points {
            xy.push(GdsPoint::new(to_db(p.x, scale)?, to_db(p.y, scale)?));
        }
        // GDS boundaries are explicitly closed.
        xy.push(xy[0].clone());
        cell.elems.push(GdsElement::GdsBoundary(GdsBoundary {
            layer: opts.layer,
            datatype: 0,
            xy,
            ..Default::default()
        }));
    }
    debug!(
        "gds cell {:?}: {} boundaries on layer {}",
        cell.name,
        cell.elems.len(),
        opts.layer
    );
    lib.structs.push(cell);
    Ok(lib)
}

/// Convert and save a device to a GDS file at `path`.
pub fn write_gds(device: &Device, path: &Path, opts: &WriteOptions) -> Result<(), ExportError> {
    let lib = to_library(device, opts)?;
    lib.save(path).map_err(|e| ExportError::Gds(e.to_string()))
}

fn to_db(value: f64, scale: f64) -> Result<i32, ExportError> {
    let snapped = (value * scale).round();
    if snapped < i32::MIN as f64 || snapped > i32::MAX as f64 {
        return Err(ExportError::CoordinateOverflow { value });
    }
    Ok(snapped as i32)
}

fn is_legal(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '?' | '$'))
}

/// Apply the auto-rename rules: illegal characters become underscores and
/// the result is capped at `max_cellname_length`. With auto-rename off,
/// names that need either fix are rejected.
fn cell_name(name: &str, opts: &WriteOptions) -> Result<String, ExportError> {
    if is_legal(name) && name.len() <= opts.max_cellname_length {
        return Ok(name.to_string());
    }
    if !opts.auto_rename {
        return Err(ExportError::BadCellName {
            name: name.to_string(),
        });
    }
    let mut renamed: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '?' | '$') {
                c
            } else {
                '_'
            }
        })
        .take(opts.max_cellname_length)
        .collect();
    if renamed.is_empty() {
        renamed.push_str("cell");
        renamed.truncate(opts.max_cellname_length);
    }
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_geom::{Device, FlowerSpec, PetalStyle, Point, Polygon};

    fn flower_device() -> Device {
        let mut device = Device::new("mask");
        device
            .add_flower(&FlowerSpec::new(
                PetalStyle::Arc,
                6,
                5000.0,
                1000.0,
                Point::ORIGIN,
            ))
            .unwrap();
        device
    }

    #[test]
    fn test_single_cell_library_shape() {
        let lib = to_library(&flower_device(), &WriteOptions::default()).unwrap();
        assert_eq!(lib.name, "mask");
        assert_eq!(lib.structs.len(), 1);

        let cell = &lib.structs[0];
        assert_eq!(cell.name, "toplevel");
        assert_eq!(cell.elems.len(), 7);
        for elem in &cell.elems {
            match elem {
                GdsElement::GdsBoundary(b) => {
                    assert_eq!(b.layer, 0);
                    assert_eq!(b.datatype, 0);
                    // Rings are explicitly closed.
                    assert_eq!(b.xy.first(), b.xy.last());
                }
                other => panic!("unexpected element {other:?}"),
            }
        }
    }

    #[test]
    fn test_units_record() {
        let lib = to_library(&flower_device(), &WriteOptions::default()).unwrap();
        assert_eq!(lib.units, GdsUnits::new(1.0, 1e-9));
    }

    #[test]
    fn test_database_grid_snapping() {
        let mut device = Device::new("snap");
        device.push(Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.5, 0.0),
            Point::new(1.5, 0.25),
        ]));
        // User unit um, database unit nm: 1.5 user units -> 1500 db units.
        let opts = WriteOptions {
            unit: 1e-6,
            precision: 1e-9,
            ..Default::default()
        };
        let lib = to_library(&device, &opts).unwrap();
        let GdsElement::GdsBoundary(b) = &lib.structs[0].elems[0] else {
            panic!("expected boundary");
        };
        assert_eq!(b.xy[1], GdsPoint::new(1500, 0));
        assert_eq!(b.xy[2], GdsPoint::new(1500, 250));
    }

    #[test]
    fn test_auto_rename_caps_length() {
        let opts = WriteOptions {
            cellname: "A".repeat(40),
            ..Default::default()
        };
        let lib = to_library(&flower_device(), &opts).unwrap();
        assert_eq!(lib.structs[0].name.len(), 28);
    }

    #[test]
    fn test_auto_rename_replaces_illegal_chars() {
        let opts = WriteOptions {
            cellname: "my device!".to_string(),
            ..Default::default()
        };
        let lib = to_library(&flower_device(), &opts).unwrap();
        assert_eq!(lib.structs[0].name, "my_device_");
    }

    #[test]
    fn test_bad_name_rejected_without_auto_rename() {
        let opts = WriteOptions {
            cellname: "my device!".to_string(),
            auto_rename: false,
            ..Default::default()
        };
        assert!(matches!(
            to_library(&flower_device(), &opts),
            Err(ExportError::BadCellName { .. })
        ));
    }

    #[test]
    fn test_coordinate_overflow() {
        let mut device = Device::new("big");
        device.push(Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3e9, 0.0),
            Point::new(3e9, 1.0),
        ]));
        assert!(matches!(
            to_library(&device, &WriteOptions::default()),
            Err(ExportError::CoordinateOverflow { .. })
        ));
    }

    #[test]
    fn test_invalid_units_rejected() {
        let opts = WriteOptions {
            precision: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            to_library(&flower_device(), &opts),
            Err(ExportError::InvalidUnits { .. })
        ));
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowers.gds");

        write_gds(&flower_device(), &path, &WriteOptions::default()).unwrap();

        let lib = GdsLibrary::load(&path).unwrap();
        assert_eq!(lib.structs.len(), 1);
        assert_eq!(lib.structs[0].elems.len(), 7);
    }
}
