//! Top-down grid viewer with the ray fan of every screen column.
//!
//! ```bash
//! cargo run --release --bin yarc_rs -- [--map map.xip] [--cell 32]
//! ```
//!
//! Arrows / WASD move the player exactly as the first-person viewer does.

use clap::Parser;
use minifb::{Key, Window, WindowOptions};
use std::path::PathBuf;

use yarc_rs::{
    Fixed, Tuning,
    engine::cast_column,
    sim::{InputThrottle, Intents, apply_intents},
    world::{GridView, PlayerState},
    xip::{MapFile, demo},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// MAP0 blob (built-in demo level when omitted)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Pixels per grid cell
    #[arg(long, default_value_t = 32)]
    cell: usize,

    /// Number of rays, i.e. the first-person view width
    #[arg(long, default_value_t = 160)]
    columns: u8,
}

const FLOOR: u32 = 0x00_101010;
const GRID_LINE: u32 = 0x00_202020;
const RAY: u32 = 0x00_C0A000;
const PLAYER: u32 = 0x00_00FF00;
const FACING: u32 = 0x00_FF0000;

/// Distinct colour per tile value.
fn tile_colour(tile: u8) -> u32 {
    const PALETTE: [u32; 6] = [
        0x00_8080C0, 0x00_C08080, 0x00_80C080, 0x00_C0C080, 0x00_80C0C0, 0x00_C080C0,
    ];
    PALETTE[(tile as usize - 1) % PALETTE.len()]
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

    let map = match &opts.map {
        Some(path) => MapFile::from_file(path)?,
        None => demo::map()?,
    };
    let grid = map.grid();
    let mut player = map.player();
    let tuning = Tuning::default();
    let mut throttle = InputThrottle::new(tuning.input_interval);

    let cell = opts.cell.max(4);
    let w = grid.width() as usize * cell;
    let h = grid.height() as usize * cell;
    let mut buffer = vec![0u32; w * h];

    let mut win = Window::new("yarc_rs map", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    while win.is_open() && !win.is_key_down(Key::Escape) {
        if throttle.ready(std::time::Instant::now()) {
            apply_intents(&mut player, &grid, intents(&win), &tuning);
        }

        draw_grid(&mut buffer, w, h, cell, &grid);
        draw_rays(&mut buffer, w, h, cell, &grid, &player, opts.columns);
        draw_player(&mut buffer, w, h, cell, &player);

        win.update_with_buffer(&buffer, w, h)?;
    }
    Ok(())
}

/// Grid-space point → pixel.
fn to_screen(x: Fixed, y: Fixed, cell: usize) -> (i32, i32) {
    let c = cell as f32;
    ((x.to_f32() * c) as i32, (y.to_f32() * c) as i32)
}

fn draw_grid(buf: &mut [u32], w: usize, h: usize, cell: usize, grid: &GridView<'_>) {
    for py in 0..h {
        for px in 0..w {
            let (gx, gy) = ((px / cell) as i16, (py / cell) as i16);
            let tile = grid.tile(gx, gy);
            buf[py * w + px] = if tile > 0 {
                tile_colour(tile)
            } else if px % cell == 0 || py % cell == 0 {
                GRID_LINE
            } else {
                FLOOR
            };
        }
    }
}

fn draw_rays(
    buf: &mut [u32],
    w: usize,
    h: usize,
    cell: usize,
    grid: &GridView<'_>,
    player: &PlayerState,
    columns: u8,
) {
    let (px, py) = player.pos();
    let (x0, y0) = to_screen(px, py, cell);
    for x in 0..columns {
        let hit = cast_column(player, x, columns, grid);
        // perpendicular distance times the unnormalised ray is the hit point
        let hx = px + hit.ray_dir_x * hit.wall_dist;
        let hy = py + hit.ray_dir_y * hit.wall_dist;
        let (x1, y1) = to_screen(hx, hy, cell);
        draw_line(buf, w, h, x0, y0, x1, y1, RAY);
    }
}

fn draw_player(buf: &mut [u32], w: usize, h: usize, cell: usize, player: &PlayerState) {
    let (px, py) = player.pos();
    let (dx, dy) = player.dir();
    let (cx, cy) = to_screen(px, py, cell);
    let (fx, fy) = to_screen(px + dx / 2i16, py + dy / 2i16, cell);
    draw_line(buf, w, h, cx, cy, fx, fy, FACING);

    let r = (cell / 8).max(1) as i32;
    for y in cy - r..=cy + r {
        for x in cx - r..=cx + r {
            if (0..w as i32).contains(&x) && (0..h as i32).contains(&y) {
                buf[y as usize * w + x as usize] = PLAYER;
            }
        }
    }
}

/// Integer Bresenham line-drawing algorithm.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
