use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use petal_gds::WriteOptions;
use petal_geom::{Compensation, Device, FlowerSpec, GeomError, PetalStyle, Point};

/// Parameter grid for the full mask: five rows of flowers sweeping outer
/// radius, centerline curvature, and petal count. Distances are in
/// nanometres.
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Flowers per row
    #[arg(long, default_value_t = 6)]
    pub columns: u32,

    /// Petal count for the arc and line rows
    #[arg(long = "petals", default_value_t = 6)]
    pub n_petals: u32,

    /// Center-to-center spacing between flowers, nm
    #[arg(long, default_value_t = 20_000.0)]
    pub spacing: f64,

    /// Base outer radius, nm
    #[arg(long = "outer", default_value_t = 5_000.0)]
    pub outer_radius: f64,

    /// Inner radius for the curved rows, nm
    #[arg(long = "inner", default_value_t = 1_000.0)]
    pub inner_radius: f64,

    /// Base centerline arc radius for the curved-by-radius rows, nm
    #[arg(long = "arc-radius", default_value_t = 8_000.0)]
    pub arc_radius: f64,

    /// Petal turning angle for the curved-by-angle row, degrees
    #[arg(long = "petal-rotation", default_value_t = 90.0)]
    pub petal_rotation: f64,
}

impl Default for GridArgs {
    fn default() -> Self {
        GridArgs {
            columns: 6,
            n_petals: 6,
            spacing: 20_000.0,
            outer_radius: 5_000.0,
            inner_radius: 1_000.0,
            arc_radius: 8_000.0,
            petal_rotation: 90.0,
        }
    }
}

/// Per-column increments of the swept parameters.
const OUTER_RADIUS_STEP: f64 = 1_000.0;
const ARC_RADIUS_STEP: f64 = 1_000.0;

/// Assemble the full mask device from the parameter grid.
pub fn build_device(grid: &GridArgs) -> Result<Device, GeomError> {
    let mut device = Device::new("flowers");

    // Row 0: arc petals, outer radius growing per column.
    for i in 0..grid.columns {
        let outer = grid.outer_radius + OUTER_RADIUS_STEP * i as f64;
        device.add_flower(&FlowerSpec::new(
            PetalStyle::Arc,
            grid.n_petals,
            outer,
            outer / 5.0,
            Point::new(grid.spacing * i as f64, 0.0),
        ))?;
    }

    // Row 1: the same sweep with straight petals.
    for i in 0..grid.columns {
        let outer = grid.outer_radius + OUTER_RADIUS_STEP * i as f64;
        device.add_flower(&FlowerSpec::new(
            PetalStyle::Line,
            grid.n_petals,
            outer,
            outer / 5.0,
            Point::new(grid.spacing * i as f64, grid.spacing),
        ))?;
    }

    // Rows 2 and 3: curved petals, centerline tightening per column, at
    // the base petal count and at ten petals.
    for (row, n_petals) in [(2.0, grid.n_petals), (3.0, 10)] {
        for i in 0..grid.columns {
            device.add_flower(&FlowerSpec::new(
                PetalStyle::CurvedByRadius {
                    arc_radius: grid.arc_radius - ARC_RADIUS_STEP * i as f64,
                    comp: Compensation::default(),
                },
                n_petals,
                grid.outer_radius,
                grid.inner_radius,
                Point::new(grid.spacing * i as f64, row * grid.spacing),
            ))?;
        }
    }

    // Row 4: fixed turning angle, petal count growing per column.
    for i in 0..grid.columns {
        device.add_flower(&FlowerSpec::new(
            PetalStyle::CurvedByAngle {
                petal_rotation: grid.petal_rotation,
                comp: Compensation::default(),
            },
            2 * (i + 1),
            grid.outer_radius,
            grid.inner_radius,
            Point::new(grid.spacing * i as f64, 4.0 * grid.spacing),
        ))?;
    }

    Ok(device)
}

#[derive(Args, Debug, Clone)]
#[command(about = "Generate the flower mask and write it as GDS")]
pub struct LayoutArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Output GDS file
    #[arg(short, long, default_value = "flowers.gds")]
    pub output: PathBuf,

    /// Also write an SVG preview to this path
    #[arg(long, value_name = "FILE")]
    pub preview: Option<PathBuf>,

    /// User unit, metres
    #[arg(long, default_value_t = 1e-9)]
    pub unit: f64,

    /// Database unit (grid resolution), metres
    #[arg(long, default_value_t = 1e-9)]
    pub precision: f64,

    /// Top-level cell name
    #[arg(long, default_value = "toplevel")]
    pub cellname: String,

    /// Maximum cell-name length
    #[arg(long, default_value_t = 28)]
    pub max_cellname_length: usize,

    /// Fail on illegal cell names instead of renaming them
    #[arg(long)]
    pub no_auto_rename: bool,
}

pub fn execute(args: LayoutArgs) -> Result<()> {
    let device = build_device(&args.grid)?;
    info!("assembled {} polygons", device.len());

    let opts = WriteOptions {
        unit: args.unit,
        precision: args.precision,
        auto_rename: !args.no_auto_rename,
        max_cellname_length: args.max_cellname_length,
        cellname: args.cellname.clone(),
        layer: 0,
    };
    petal_gds::write_gds(&device, &args.output, &opts)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote {} ({} polygons)", args.output.display(), device.len());

    if let Some(svg_path) = &args.preview {
        crate::preview::write_svg(&device, svg_path)?;
        println!("Wrote {}", svg_path.display());
    }
    Ok(())
}
