use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use petal_geom::Device;

use crate::layout::{build_device, GridArgs};

#[derive(Args, Debug, Clone)]
#[command(about = "Write an SVG quick-preview of the flower mask")]
pub struct PreviewArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Output SVG file
    #[arg(short, long, default_value = "flowers.svg")]
    pub output: PathBuf,
}

pub fn execute(args: PreviewArgs) -> Result<()> {
    let device = build_device(&args.grid)?;
    write_svg(&device, &args.output)?;
    println!("Wrote {} ({} polygons)", args.output.display(), device.len());
    Ok(())
}

/// Render the device as a standalone SVG, y-axis up as in the layout.
pub fn render_svg(device: &Device) -> String {
    let (min_x, min_y, width, height) = match device.bounding_box() {
        Some(bbox) => {
            let margin = 0.05 * bbox.width().max(bbox.height()).max(1.0);
            (
                bbox.min.x - margin,
                // Flip y: SVG grows downward.
                -(bbox.max.y + margin),
                bbox.width() + 2.0 * margin,
                bbox.height() + 2.0 * margin,
            )
        }
        None => (0.0, 0.0, 1.0, 1.0),
    };

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" \
         viewBox=\"{min_x:.1} {min_y:.1} {width:.1} {height:.1}\" \
         width=\"900\" style=\"background:#1a1a2e\">\n"
    );
    for polygon in device.polygons() {
        svg.push_str("  <polygon points=\"");
        for p in polygon.points() {
            let _ = write!(svg, "{:.1},{:.1} ", p.x, -p.y);
        }
        svg.push_str("\" fill=\"#d4a017\" fill-opacity=\"0.9\"/>\n");
    }
    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg(device: &Device, path: &Path) -> Result<()> {
    fs::write(path, render_svg(device))
        .with_context(|| format!("Failed to write {}", path.display()))
}
