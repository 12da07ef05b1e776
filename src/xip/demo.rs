//! Built-in demo level and procedural texture set.
//!
//! Every pattern is followed by its shaded variant, so tile `N` finds its
//! Y-side texture at `N`. With this layout odd tile values line up with a
//! pattern and its own shade; even values pair a shade with the next
//! pattern.

use super::{Assets, AssetError, MapError, MapFile, TextureFile, TextureFileError};
use crate::{
    fixed::Fixed,
    world::{Rgb565, TEX_AREA, TEX_SIZE, darken},
};

pub const DEMO_WIDTH: u8 = 10;
pub const DEMO_HEIGHT: u8 = 10;

/// Column-major: each line below is one `x`, top to bottom in `y`.
#[rustfmt::skip]
pub const DEMO_TILES: [u8; DEMO_WIDTH as usize * DEMO_HEIGHT as usize] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 1, 1, 1, 0, 1,
    1, 0, 0, 0, 0, 0, 1, 0, 0, 3,
    1, 0, 0, 0, 0, 2, 2, 0, 0, 3,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 3,
    1, 1, 1, 1, 2, 2, 2, 3, 3, 3,
];

pub const DEMO_START: (Fixed, Fixed) = (Fixed::from_int(6), Fixed::from_int(2));
pub const DEMO_DIR: (Fixed, Fixed) = (Fixed::from_int(-1), Fixed::ZERO);

/// Shaded variants keep 11/20 of every channel.
pub const SHADE_NUM: u16 = 11;
pub const SHADE_DEN: u16 = 20;

/// `(name, texel(x, y))` for every demo pattern, in pack order.
pub const PATTERNS: [(&str, fn(i32, i32) -> Rgb565); 8] = [
    ("xor", xor),
    ("gradient", gradient),
    ("checkers", checkers),
    ("bricks", bricks),
    ("stone_bricks", stone_bricks),
    ("symbol_wall", symbol_wall),
    ("wood", wood),
    ("vent", vent),
];

pub fn map() -> Result<MapFile, MapError> {
    MapFile::new(
        DEMO_WIDTH,
        DEMO_HEIGHT,
        DEMO_TILES.to_vec(),
        DEMO_START,
        DEMO_DIR,
    )
}

/// Render `texel` into a column-major texture.
pub fn generate(texel: fn(i32, i32) -> Rgb565) -> Vec<Rgb565> {
    let mut out = Vec::with_capacity(TEX_AREA);
    for x in 0..TEX_SIZE as i32 {
        for y in 0..TEX_SIZE as i32 {
            out.push(texel(x, y));
        }
    }
    out
}

pub fn shaded(base: &[Rgb565]) -> Vec<Rgb565> {
    base.iter().map(|&c| darken(c, SHADE_NUM, SHADE_DEN)).collect()
}

/// All patterns, each followed by its shade.
pub fn textures() -> Result<TextureFile, TextureFileError> {
    let mut texels = Vec::with_capacity(PATTERNS.len() * 2 * TEX_AREA);
    for (_, texel) in PATTERNS {
        let base = generate(texel);
        let shade = shaded(&base);
        texels.extend(base);
        texels.extend(shade);
    }
    TextureFile::new(texels)
}

pub fn assets() -> Result<Assets, AssetError> {
    Assets::new(map()?, textures()?)
}

/*──────────────────────────── patterns ────────────────────────────*/

/// 8-bit channels, clamped.
fn rgb(r: i32, g: i32, b: i32) -> Rgb565 {
    let c = |v: i32| v.clamp(0, 255) as u16;
    ((c(r) >> 3) << 11) | ((c(g) >> 2) << 5) | (c(b) >> 3)
}

fn xor(x: i32, y: i32) -> Rgb565 {
    let v = x ^ y;
    rgb(v * 4, v * 2, v * 4)
}

fn gradient(x: i32, y: i32) -> Rgb565 {
    let s = TEX_SIZE as i32;
    rgb(y * 255 / s, x * 50 / s, (s - y) * 255 / s)
}

fn checkers(x: i32, y: i32) -> Rgb565 {
    if ((x / 8) % 2) ^ ((y / 8) % 2) != 0 {
        rgb(200, 200, 200)
    } else {
        rgb(50, 50, 50)
    }
}

fn bricks(x: i32, y: i32) -> Rgb565 {
    let (w, h) = (16, 16);
    let shift = if (y / h) % 2 == 1 { w / 2 } else { 0 };
    let (tx, ty) = ((x + shift) % w, y % h);
    if tx < 1 || ty < 1 {
        return rgb(80, 80, 80);
    }
    let n = (x * y * 57) % 30 - 15;
    rgb(160 + n, 50 + n, 40 + n)
}

fn stone_bricks(x: i32, y: i32) -> Rgb565 {
    let (w, h) = (32, 16);
    let shift = if (y / h) % 2 == 1 { w / 2 } else { 0 };
    let (tx, ty) = ((x + shift) % w, y % h);
    if tx < 2 || ty < 2 {
        return rgb(20, 20, 20);
    }
    let n = ((x * 13) ^ (y * 29)) % 50 - 25;
    rgb(100 + n, 100 + n, 110 + n)
}

fn symbol_wall(x: i32, y: i32) -> Rgb565 {
    let (dx, dy) = (x - 32, y - 32);
    let dist = ((dx * dx + dy * dy) as f32).sqrt();
    if dist < 12.0 {
        if dx.abs() < 3 {
            return rgb(0, 0, 0);
        }
        return rgb((255.0 - dist * 10.0) as i32, 20, 20);
    }
    if dist < 16.0 {
        return rgb(200, 180, 50);
    }
    if ((x / 16) + (y / 16)) % 2 == 0 {
        rgb(60, 60, 65)
    } else {
        rgb(50, 50, 55)
    }
}

fn wood(x: i32, y: i32) -> Rgb565 {
    let plank = 16;
    if x % plank == 0 {
        return rgb(20, 10, 5);
    }
    let grain = (y as f32 * 0.1).sin() * 5.0;
    let mut v = (x as f32 + grain) * 5.0;

    // knot
    if (x / plank) % 2 == 0 && y > 20 && y < 30 {
        let (dx, dy) = (x % plank - 8, y - 25);
        if dx * dx + dy * dy < 20 {
            v += 50.0;
        }
    }

    let i = v.rem_euclid(40.0);
    rgb(
        (120.0 + i) as i32,
        (80.0 + i) as i32,
        (40.0 + (i / 2.0).floor()) as i32,
    )
}

fn vent(x: i32, y: i32) -> Rgb565 {
    if !(2..=61).contains(&x) || !(2..=61).contains(&y) {
        return rgb(150, 150, 160);
    }
    match (y - 2) % 8 {
        0 | 1 => rgb(20, 20, 25),
        2 => rgb(60, 60, 70),
        l => {
            let c = 100 + l * 10;
            rgb(c, c, c + 10)
        }
    }
}
