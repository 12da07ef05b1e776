//! First-person software viewer.
//!
//! ```bash
//! cargo run --release -- [--map map.xip --textures textures.xip] [--scale 4]
//! ```
//!
//! Arrows / WASD walk and turn, Esc quits.

use anyhow::Context;
use clap::Parser;
use log::info;
use minifb::{Key, Scale, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use yarc_rs::{
    Engine, Fixed, Screen, Tuning,
    renderer::Framebuffer,
    sim::{InputThrottle, Intents, apply_intents},
    xip::{Assets, demo},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// MAP0 blob (built-in demo level when omitted)
    #[arg(long, value_name = "FILE", requires = "textures")]
    map: Option<PathBuf>,

    /// XIP0 texture pack matching `--map`
    #[arg(long, value_name = "FILE", requires = "map")]
    textures: Option<PathBuf>,

    /// Render width in pixels
    #[arg(long, default_value_t = 160)]
    width: u8,

    /// Render height in pixels
    #[arg(long, default_value_t = 128)]
    height: u8,

    /// Window magnification: 1, 2, 4 or 8
    #[arg(long, default_value_t = 4)]
    scale: u8,

    /// Cells walked per input update
    #[arg(long)]
    move_step: Option<f32>,

    /// Degrees turned per input update
    #[arg(long)]
    turn_degrees: Option<i16>,

    /// Camera plane length (0.66 ≈ 66° field of view)
    #[arg(long)]
    fov: Option<f32>,
}

fn window_scale(n: u8) -> anyhow::Result<Scale> {
    Ok(match n {
        1 => Scale::X1,
        2 => Scale::X2,
        4 => Scale::X4,
        8 => Scale::X8,
        _ => anyhow::bail!("unsupported --scale {n} (use 1, 2, 4 or 8)"),
    })
}

fn intents(win: &Window) -> Intents {
    let mut i = Intents::empty();
    i.set(
        Intents::FORWARD,
        win.is_key_down(Key::Up) || win.is_key_down(Key::W),
    );
    i.set(
        Intents::BACKWARD,
        win.is_key_down(Key::Down) || win.is_key_down(Key::S),
    );
    i.set(
        Intents::TURN_LEFT,
        win.is_key_down(Key::Left) || win.is_key_down(Key::A),
    );
    i.set(
        Intents::TURN_RIGHT,
        win.is_key_down(Key::Right) || win.is_key_down(Key::D),
    );
    i
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let assets = match (&opts.map, &opts.textures) {
        (Some(map), Some(tex)) => Assets::load(map, tex)
            .with_context(|| format!("loading {} + {}", map.display(), tex.display()))?,
        _ => demo::assets()?,
    };

    let screen = Screen::new(opts.width, opts.height);
    let mut tuning = Tuning::default();
    if let Some(step) = opts.move_step {
        tuning.move_step = Fixed::from_f32(step);
    }
    if let Some(deg) = opts.turn_degrees {
        tuning.turn_degrees = deg;
    }
    if let Some(fov) = opts.fov {
        tuning.fov_scale = Fixed::from_f32(fov);
    }

    let grid = assets.map().grid();
    let mut player = assets.map().player_with_fov(tuning.fov_scale);
    let mut engine = Engine::new(screen, grid, assets.textures().store(), Framebuffer::new(screen));
    let mut throttle = InputThrottle::new(tuning.input_interval);

    let mut win = Window::new(
        "yarc_rs",
        screen.width as usize,
        screen.height as usize,
        WindowOptions {
            scale: window_scale(opts.scale)?,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let now = Instant::now();
        if throttle.ready(now) {
            apply_intents(&mut player, &grid, intents(&win), &tuning);
        }

        let t0 = Instant::now();
        engine.render_frame(&player);
        acc_time += t0.elapsed();
        acc_frames += 1;

        engine
            .sink()
            .present(|fb, w, h| win.update_with_buffer(fb, w, h))?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let (x, y) = player.pos();
            info!(
                "avg render: {avg_ms:.3} ms ({:.0} FPS)  pos ({x}, {y})",
                1000.0 / avg_ms
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
