//! whitted-cli — a recursive Whitted-style CPU ray tracer
//!
//! Loads a Wavefront-like scene file and renders it to a PNG image via
//! shadow rays, mirror reflections, and dielectric refraction.

use clap::Parser;
use whitted_cli::math::Vec3;
use whitted_cli::{render, CameraOptions, RenderMode, RenderOptions};

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated numbers, got '{s}'"));
    }
    let mut components = [0.0; 3];
    for (slot, part) in components.iter_mut().zip(parts.iter()) {
        *slot = part
            .parse::<f64>()
            .map_err(|_| format!("'{part}' is not a valid number"))?;
    }
    Ok(Vec3::new(components[0], components[1], components[2]))
}

/// whitted-cli — render a scene file to PNG
#[derive(Parser, Debug)]
#[command(
    name = "whitted-cli",
    version,
    about = "A recursive Whitted-style CPU ray tracer",
    after_help = "EXAMPLES:\n  \
                  whitted-cli scene.obj -o out.png\n  \
                  whitted-cli scene.obj --mode normal --width 400 --height 300\n  \
                  whitted-cli scene.obj --look-from 0,2,8 --look-to 0,0,0 --fov 60"
)]
struct Cli {
    /// Path to the scene file (Wavefront-like `.obj`, referencing a `.mtl` via `mtllib`)
    scene: String,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    output: String,

    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = 600)]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f64,

    /// Camera position, as "x,y,z"
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,0")]
    look_from: Vec3,

    /// Point the camera looks toward, as "x,y,z"
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,-1")]
    look_to: Vec3,

    /// Maximum recursion depth for reflection/refraction bounces
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Render mode
    #[arg(long, value_enum, default_value_t = CliRenderMode::Full)]
    mode: CliRenderMode,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliRenderMode {
    /// Phong-shaded, reflected, and refracted color
    Full,
    /// Shading normals remapped into `[0, 1]`
    Normal,
    /// Hit distance
    Depth,
}

impl From<CliRenderMode> for RenderMode {
    fn from(mode: CliRenderMode) -> Self {
        match mode {
            CliRenderMode::Full => RenderMode::Full,
            CliRenderMode::Normal => RenderMode::Normal,
            CliRenderMode::Depth => RenderMode::Depth,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let camera_options = CameraOptions {
        screen_width: cli.width,
        screen_height: cli.height,
        fov: cli.fov.to_radians(),
        look_from: cli.look_from,
        look_to: cli.look_to,
    };

    let render_options = RenderOptions {
        depth: cli.depth,
        mode: cli.mode.into(),
    };

    whitted_cli::report::print_header(&cli.scene, &camera_options, &render_options);

    match render(&cli.scene, &camera_options, &render_options) {
        Ok((image, stats)) => {
            if let Err(e) = image.write(&cli.output) {
                eprintln!("error: failed to write {}: {e}", cli.output);
                std::process::exit(1);
            }
            whitted_cli::report::print_summary(&stats, &cli.output);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_camera_and_render_options() {
        let cli = Cli::parse_from(["whitted-cli", "scene.obj"]);
        assert_eq!(cli.width, 800);
        assert_eq!(cli.height, 600);
        assert_eq!(cli.fov, 90.0);
        assert_eq!(cli.look_from, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(cli.look_to, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(cli.depth, 4);
        assert!(matches!(cli.mode, CliRenderMode::Full));
        assert_eq!(cli.output, "output.png");
    }

    #[test]
    fn fov_in_degrees_converts_to_radians() {
        let cli = Cli::parse_from(["whitted-cli", "scene.obj", "--fov", "90"]);
        let camera_options = CameraOptions {
            screen_width: cli.width,
            screen_height: cli.height,
            fov: cli.fov.to_radians(),
            look_from: cli.look_from,
            look_to: cli.look_to,
        };
        assert!((camera_options.fov - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn look_from_accepts_comma_separated_triple() {
        let cli = Cli::parse_from(["whitted-cli", "scene.obj", "--look-from", "1,2,3"]);
        assert_eq!(cli.look_from, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn parse_vec3_rejects_wrong_arity() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").is_err());
    }

    #[test]
    fn render_mode_flag_selects_variant() {
        let cli = Cli::parse_from(["whitted-cli", "scene.obj", "--mode", "depth"]);
        assert!(matches!(cli.mode, CliRenderMode::Depth));
    }
}
