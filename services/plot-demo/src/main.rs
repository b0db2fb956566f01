//! Demo renderer for spherical-shell fields.
//!
//! Generates a synthetic snapshot and writes a global map, meridional and
//! equatorial slices and a 3D shell view as PNG files.

mod fields;

use anyhow::{Context, Result};
use clap::Parser;
use plot_common::{Colormap, RenderConfig};
use projection::MapProjection;
use renderer::{
    eq_contour, mer_contour, render_map, surface_3d, Figure, Levels, MapOptions, MapVectors,
    SurfaceOptions,
};
use scene3d::{Camera, SoftwareSurfaceBackend};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fields::Snapshot;

#[derive(Parser, Debug)]
#[command(name = "plot-demo")]
#[command(about = "Render demo figures of a synthetic spherical-shell snapshot")]
struct Args {
    /// Directory the PNG files are written to
    #[arg(short, long, default_value = "figures")]
    output_dir: PathBuf,

    /// JSON render configuration (defaults and PLOT_* variables otherwise)
    #[arg(short, long, env = "PLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Override pixels per figure inch
    #[arg(long)]
    dpi: Option<f32>,

    /// Colormap name, `_r` suffix reverses it
    #[arg(long, default_value = "seismic")]
    colormap: String,

    /// Global map projection (ortho, moll)
    #[arg(short, long, default_value = "moll")]
    projection: String,

    /// Number of contour levels
    #[arg(long, default_value = "65")]
    levels: usize,

    /// Azimuthal resolution; colatitude uses half of it
    #[arg(long, default_value = "128")]
    nphi: usize,

    /// Number of radial levels
    #[arg(long, default_value = "17")]
    nr: usize,

    /// Shell shown on the global map and the 3D view
    #[arg(long)]
    shell: Option<usize>,

    /// Draw map gridlines
    #[arg(long)]
    grid: bool,

    /// Overlay the horizontal flow on the global map (every Nth point)
    #[arg(long)]
    map_vectors: Option<usize>,

    /// Skip arrows in the 3D view
    #[arg(long)]
    no_vectors: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let builder = FmtSubscriber::builder().with_max_level(level);
    if args.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let mut config = match &args.config {
        Some(path) => RenderConfig::from_file(path)
            .with_context(|| format!("loading render config {}", path.display()))?,
        None => RenderConfig::from_env(),
    };
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }
    config.validate()?;

    // Identifiers are checked before any data is generated.
    let colormap: Colormap = args.colormap.parse()?;
    let projection: MapProjection = args.projection.parse()?;
    let levels = Levels::Count(args.levels);

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let snapshot = Snapshot::generate(args.nphi, args.nr, 0.35);
    let shell = args.shell.unwrap_or(snapshot.r.len() / 2);
    info!(
        nphi = snapshot.phi.len(),
        ntheta = snapshot.theta.len(),
        nr = snapshot.r.len(),
        shell,
        %colormap,
        %projection,
        "Generated snapshot"
    );

    let mut options = MapOptions::new(projection);
    options.shell_index = shell;
    options.draw_grid = args.grid;
    options.levels = levels.clone();
    options.colormap = colormap;
    options.vectors = args.map_vectors.map(|stride| MapVectors {
        u_phi: &snapshot.u_phi,
        u_theta: &snapshot.u_theta,
        stride,
    });
    let map = render_map(&snapshot.theta, &snapshot.phi, &snapshot.temperature, &options, &config)?;
    save(&map, &args.output_dir, &format!("map_{}.png", projection.name()))?;

    let meridional = mer_contour(
        &snapshot.r,
        &snapshot.theta,
        &snapshot.meridional(0),
        &levels,
        colormap,
        &config,
    )?;
    save(&meridional, &args.output_dir, "meridional.png")?;

    let equatorial = eq_contour(
        &snapshot.r,
        &snapshot.phi,
        &snapshot.equatorial(),
        &levels,
        colormap,
        &config,
    )?;
    save(&equatorial, &args.output_dir, "equatorial.png")?;

    let [x, y, z, ux, uy, uz] = snapshot.cartesian();
    let backend = SoftwareSurfaceBackend::new(Camera::default());
    let surface_options = SurfaceOptions {
        colormap,
        draw_vectors: !args.no_vectors,
        vector_scale: 0.05,
        ..SurfaceOptions::default()
    };
    let surface = surface_3d(
        Some(&backend),
        &x,
        &y,
        &z,
        shell,
        &ux,
        &uy,
        &uz,
        &snapshot.temperature,
        &surface_options,
        &config,
    )?;
    save(&surface, &args.output_dir, "surface.png")?;

    info!(output_dir = %args.output_dir.display(), "Done");
    Ok(())
}

fn save(figure: &Figure, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(name);
    figure
        .save_png(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        path = %path.display(),
        width = figure.width(),
        height = figure.height(),
        primitives = figure.primitive_count(),
        "Saved figure"
    );
    Ok(())
}
