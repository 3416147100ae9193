use anyhow::{ensure, Result};
use clap::Args;
use petal_magneto::{displacement, displacement_slope, susceptibility, Disk};

#[derive(Args, Debug, Clone)]
#[command(about = "Print vortex displacement slopes for a set of disk radii")]
pub struct DisplacementArgs {
    /// Disk radii, micrometres
    #[arg(long = "radius", value_name = "UM", num_args = 1.., default_values_t = [0.5, 1.0, 1.5])]
    pub radii: Vec<f64>,

    /// Disk thickness, nanometres
    #[arg(long, default_value_t = 80.0)]
    pub thickness: f64,

    /// Saturation magnetization, A/m
    #[arg(long, default_value_t = 860_000.0)]
    pub msat: f64,

    /// Empirical correction applied to the aspect ratio before the
    /// susceptibility formula
    #[arg(long = "beta-correction", default_value_t = 0.55)]
    pub beta_correction: f64,

    /// Also print the displacement at this in-plane field, mT
    #[arg(long, value_name = "MT")]
    pub field: Option<f64>,
}

pub fn execute(args: DisplacementArgs) -> Result<()> {
    ensure!(args.msat > 0.0, "saturation magnetization must be positive");
    ensure!(
        args.beta_correction > 0.0,
        "aspect-ratio correction must be positive"
    );

    for &radius_um in &args.radii {
        let disk = Disk::new(radius_um * 1e-6, args.thickness * 1e-9)?;
        let chi = susceptibility(disk.aspect_ratio() * args.beta_correction)?;
        let slope = displacement_slope(&disk, args.msat, chi);
        // m/T prints as um/mT.
        println!(
            "R = {radius_um:.2} um: chi = {chi:.3}, slope = {:.6} um/mT",
            slope * 1e3
        );
        if let Some(field_mt) = args.field {
            let d = displacement(&disk, args.msat, chi, field_mt * 1e-3);
            println!("  displacement at {field_mt} mT: {:.4} um", d * 1e6);
        }
    }
    Ok(())
}
