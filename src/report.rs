//! stderr reporting: a render header, a live progress bar, and a post-render
//! summary.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use crate::camera::CameraOptions;
use crate::renderer::RenderStats;
use crate::shading::{RenderMode, RenderOptions};

fn mode_name(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Full => "full (Phong shading, reflections, refractions)",
        RenderMode::Normal => "normal (shading normals)",
        RenderMode::Depth => "depth (hit distance)",
    }
}

pub fn print_header(scene_path: &str, camera_options: &CameraOptions, render_options: &RenderOptions) {
    eprintln!();
    eprintln!("  ╔═══════════════════════════════════════════════╗");
    eprintln!("  ║  whitted-cli — recursive ray tracer            ║");
    eprintln!("  ╚═══════════════════════════════════════════════╝");
    eprintln!();
    eprintln!("  Scene:      {scene_path}");
    eprintln!(
        "  Resolution: {}×{}",
        camera_options.screen_width, camera_options.screen_height
    );
    eprintln!("  Mode:       {}", mode_name(render_options.mode));
    eprintln!("  Depth:      {}", render_options.depth);
    eprintln!();
}

/// A progress bar ticked from pixel-tracing worker threads. `tick` only
/// needs `&self` — `done` and `last_pct` are atomics so any number of
/// threads can call it concurrently without a lock around the counters.
/// Printed lines may interleave under contention; this is a diagnostic, not
/// a correctness surface.
pub struct ProgressBar {
    total: u32,
    done: AtomicU32,
    last_pct: AtomicU32,
    start: Instant,
}

impl ProgressBar {
    pub fn new(total: u32) -> Self {
        Self {
            total: total.max(1),
            done: AtomicU32::new(0),
            last_pct: AtomicU32::new(0),
            start: Instant::now(),
        }
    }

    pub fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let pct = (done * 100 / self.total).min(100);
        let prev = self.last_pct.swap(pct, Ordering::Relaxed);
        if pct != prev {
            let elapsed = self.start.elapsed().as_secs_f64();
            let rate = done as f64 / elapsed.max(1e-9);
            let remaining = (self.total - done) as f64 / rate.max(1e-9);
            let bar_width = 24;
            let filled = (pct as usize * bar_width) / 100;
            let empty = bar_width - filled;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));
            eprint!("\r  Rendering: │{bar}│ {pct:3}%  ETA {:.0}s   ", remaining);
        }
    }

    pub fn finish(&self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        let bar = "█".repeat(24);
        eprintln!("\r  Rendering: │{bar}│ 100%  {elapsed:.2}s       ");
    }
}

pub fn print_summary(stats: &RenderStats, output_path: &str) {
    let bar_width = 30;
    let fill = "━".repeat(bar_width);
    eprintln!("  {fill}");
    eprintln!("  Time:     {:.2}s", stats.elapsed_secs);
    eprintln!(
        "  Rays:     {:.2}M primary ({:.2} Mrays/s)",
        stats.total_rays as f64 / 1e6,
        stats.rays_per_sec() / 1e6
    );
    eprintln!("  Image:    {}×{} → {output_path}", stats.width, stats.height);
    eprintln!("  {fill}");
    eprintln!();
}
