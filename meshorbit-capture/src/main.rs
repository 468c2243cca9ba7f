//! meshorbit - render a mesh from a ring of camera positions
//!
//! Usage: `meshorbit <mesh> <output_dir>`

use anyhow::Context;
use clap::Parser;
use meshorbit_capture::{Capture, CaptureConfig};
use meshorbit_render::{RasterRenderer, SceneGraph};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "meshorbit",
    version,
    about = "Render a mesh from twelve camera positions around it"
)]
struct Args {
    /// Mesh file (.off, .obj or .stl)
    mesh: PathBuf,

    /// Directory that receives <name>/<name>_<i>.png
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = CaptureConfig::default();
    let mut scene = SceneGraph::new();
    let mut renderer =
        RasterRenderer::new(config.render.clone()).context("failed to set up renderer")?;

    let mut capture = Capture::new(&mut scene, &mut renderer, config)
        .context("invalid capture configuration")?;
    let images = capture
        .capture(&args.mesh, &args.output_dir)
        .with_context(|| format!("failed to capture {}", args.mesh.display()))?;

    log::info!(
        "Wrote {} image(s) under {}",
        images.len(),
        args.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_exactly_two_paths() {
        assert!(Args::try_parse_from(["meshorbit"]).is_err());
        assert!(Args::try_parse_from(["meshorbit", "a.off"]).is_err());
        assert!(Args::try_parse_from(["meshorbit", "a.off", "out", "extra"]).is_err());

        let args = Args::try_parse_from(["meshorbit", "a.off", "out"]).unwrap();
        assert_eq!(args.mesh, PathBuf::from("a.off"));
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }
}
