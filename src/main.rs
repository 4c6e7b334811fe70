//! WIRESPIN demo: render the spinning cube to PNG frames
//!
//! Usage: `wirespin [output_dir] [frames]`
//!
//! Draws the built-in cube at a sequence of view angles into the RGB565
//! framebuffer and writes one PNG per frame. A model path ending in `.ron`
//! may be given instead of the output dir to render a user model.

use std::path::{Path, PathBuf};

use wirespin::framebuffer::{rgb565, Framebuffer, HEIGHT, WIDTH};
use wirespin::models::{WireModel, CUBE_PATH};
use wirespin::transform::Point3;
use wirespin::wire::{StreamFormat, WireRenderer};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let first = args.next();
    let frames: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);

    // A .ron argument selects a user model; anything else is the output dir
    let (model, out_dir) = match first {
        Some(arg) if arg.ends_with(".ron") => {
            let model = match WireModel::load(Path::new(&arg)) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("wirespin: cannot load {arg}: {e}");
                    std::process::exit(1);
                }
            };
            (Some(model), PathBuf::from("frames"))
        }
        Some(arg) => (None, PathBuf::from(arg)),
        None => (None, PathBuf::from("frames")),
    };

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("wirespin: cannot create {}: {e}", out_dir.display());
        std::process::exit(1);
    }

    let mut fb = Framebuffer::new(WIDTH, HEIGHT);
    let color = rgb565(96, 255, 128);
    let mut watchdog = || log::trace!("keep-alive");
    let mut renderer = WireRenderer::new(StreamFormat::WIRE, (WIDTH / 2) as i32, (HEIGHT / 2) as i32)
        .with_keep_alive(&mut watchdog);

    for frame in 0..frames {
        fb.clear(rgb565(8, 8, 24));

        // tumble around two axes, a quarter turn over the full sequence
        let t = frame as f64 / frames as f64;
        let view = Point3::new(30.0 + 90.0 * t, 45.0 * t, 360.0 * t);

        let result = match &model {
            Some(m) => renderer.draw(m.records(), &mut fb, view, 3.0, color),
            None => renderer.draw(CUBE_PATH.iter().copied(), &mut fb, view, 3.0, color),
        };
        if let Err(e) = result {
            eprintln!("wirespin: draw failed: {e}");
            std::process::exit(1);
        }

        let path = out_dir.join(format!("frame{frame:03}.png"));
        if let Err(e) = fb.to_image().save(&path) {
            eprintln!("wirespin: cannot write {}: {e}", path.display());
            std::process::exit(1);
        }
        log::info!("wrote {}", path.display());
    }

    println!("wirespin v{VERSION}: {frames} frames -> {}", out_dir.display());
}
