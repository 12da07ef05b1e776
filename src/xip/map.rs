//! # MAP0 map blob
//!
//! ```text
//! header   magic u32 "MAP0" | version u32 | player_offset u32 | map_offset u32 | reserved u32
//! player   pos_x i32 | pos_y i32 | dir_x i32 | dir_y i32      (raw Q15.16)
//! map      width u8 | height u8 | tiles[width * height]        (column-major)
//! ```
//!
//! Everything is little-endian. Headers go through **bincode 2**; the tile
//! array is a plain byte slice.

use bincode::{Decode, Encode, decode_from_slice, encode_into_std_write};
use byteorder::ReadBytesExt;
use log::{info, warn};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use thiserror::Error;

use super::{bin_config, section};
use crate::{
    fixed::Fixed,
    world::{GridView, PlayerState},
};

/// `b"MAP0"` read as a little-endian `u32`.
pub const MAP_MAGIC: u32 = u32::from_le_bytes(*b"MAP0");
/// 1.0.00
pub const MAP_VERSION: u32 = 100_000;

pub const MAP_HEADER_SIZE: usize = 20;
pub const PLAYER_RECORD_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Decode, Encode)]
pub struct MapHeader {
    pub magic: u32,
    pub version: u32,
    pub player_offset: u32,
    pub map_offset: u32,
    pub reserved: u32,
}

/// Player start as stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Decode, Encode)]
pub struct PlayerRecord {
    pub pos_x: i32,
    pub pos_y: i32,
    pub dir_x: i32,
    pub dir_y: i32,
}

/// Map loading / validation errors.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a MAP0 blob (magic {0:#010x})")]
    BadMagic(u32),

    #[error("{what} at {offset}+{len} runs past end of blob ({size} bytes)")]
    Truncated {
        what: &'static str,
        offset: usize,
        len: usize,
        size: usize,
    },

    #[error("header decode: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("header encode: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("grid is {width}x{height}, both sides must be non-zero")]
    EmptyGrid { width: u8, height: u8 },

    #[error("{width}x{height} grid needs {expected} tiles, got {actual}")]
    TileCount {
        width: u8,
        height: u8,
        expected: usize,
        actual: usize,
    },

    #[error("outer wall is open at ({x},{y})")]
    OpenBorder { x: u8, y: u8 },

    #[error("player start ({x}, {y}) is not strictly inside the {width}x{height} grid")]
    PlayerOutside {
        x: Fixed,
        y: Fixed,
        width: u8,
        height: u8,
    },

    #[error("player direction is the zero vector")]
    ZeroDirection,
}

/// A decoded, validated map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapFile {
    version: u32,
    player: PlayerRecord,
    width: u8,
    height: u8,
    tiles: Vec<u8>,
}

impl MapFile {
    /// Build a map in memory (current version), validating it like a
    /// loaded one.
    pub fn new(
        width: u8,
        height: u8,
        tiles: Vec<u8>,
        pos: (Fixed, Fixed),
        dir: (Fixed, Fixed),
    ) -> Result<Self, MapError> {
        let map = Self {
            version: MAP_VERSION,
            player: PlayerRecord {
                pos_x: pos.0.raw(),
                pos_y: pos.1.raw(),
                dir_x: dir.0.raw(),
                dir_y: dir.1.raw(),
            },
            width,
            height,
            tiles,
        };
        map.validate()?;
        Ok(map)
    }

    // ------------------------------------------------------------------ //
    // Loading
    // ------------------------------------------------------------------ //

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MapError> {
        /*----------- 1. header --------------------------------------------*/
        let head = section(bytes, 0, MAP_HEADER_SIZE).ok_or(MapError::Truncated {
            what: "header",
            offset: 0,
            len: MAP_HEADER_SIZE,
            size: bytes.len(),
        })?;
        let (header, _) = decode_from_slice::<MapHeader, _>(head, bin_config())?;
        if header.magic != MAP_MAGIC {
            return Err(MapError::BadMagic(header.magic));
        }
        if header.version != MAP_VERSION {
            warn!(
                "map version {} differs from supported {MAP_VERSION}",
                header.version
            );
        }

        /*----------- 2. player record -------------------------------------*/
        let offset = header.player_offset as usize;
        let rec = section(bytes, offset, PLAYER_RECORD_SIZE).ok_or(MapError::Truncated {
            what: "player record",
            offset,
            len: PLAYER_RECORD_SIZE,
            size: bytes.len(),
        })?;
        let (player, _) = decode_from_slice::<PlayerRecord, _>(rec, bin_config())?;

        /*----------- 3. grid ------------------------------------------------*/
        let offset = header.map_offset as usize;
        let mut dims = section(bytes, offset, 2).ok_or(MapError::Truncated {
            what: "map dimensions",
            offset,
            len: 2,
            size: bytes.len(),
        })?;
        let width = dims.read_u8()?;
        let height = dims.read_u8()?;

        let len = width as usize * height as usize;
        let tiles = section(bytes, offset + 2, len).ok_or(MapError::Truncated {
            what: "tiles",
            offset: offset + 2,
            len,
            size: bytes.len(),
        })?;

        let map = Self {
            version: header.version,
            player,
            width,
            height,
            tiles: tiles.to_vec(),
        };
        map.validate()?;

        info!(
            "map v{}: {}x{} grid, player at ({}, {})",
            map.version,
            width,
            height,
            Fixed::from_raw(player.pos_x),
            Fixed::from_raw(player.pos_y)
        );
        Ok(map)
    }

    /// Everything the render loop relies on without re-checking.
    fn validate(&self) -> Result<(), MapError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(MapError::EmptyGrid { width, height });
        }

        let expected = width as usize * height as usize;
        let grid = GridView::new(width, height, &self.tiles).ok_or(MapError::TileCount {
            width,
            height,
            expected,
            actual: self.tiles.len(),
        })?;

        if let Some((x, y)) = grid.find_border_gap() {
            return Err(MapError::OpenBorder { x, y });
        }

        let (x, y) = (
            Fixed::from_raw(self.player.pos_x),
            Fixed::from_raw(self.player.pos_y),
        );
        let inside = |v: Fixed, side: u8| v >= Fixed::ONE && v < Fixed::from_int(side as i16 - 1);
        if !inside(x, width) || !inside(y, height) {
            return Err(MapError::PlayerOutside {
                x,
                y,
                width,
                height,
            });
        }

        if self.player.dir_x == 0 && self.player.dir_y == 0 {
            return Err(MapError::ZeroDirection);
        }
        Ok(())
    }

    // ------------------------------------------------------------------ //
    // Encoding
    // ------------------------------------------------------------------ //

    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), MapError> {
        let player_offset = MAP_HEADER_SIZE as u32;
        let header = MapHeader {
            magic: MAP_MAGIC,
            version: self.version,
            player_offset,
            map_offset: player_offset + PLAYER_RECORD_SIZE as u32,
            reserved: 0,
        };
        encode_into_std_write(header, &mut out, bin_config())?;
        encode_into_std_write(self.player, &mut out, bin_config())?;
        out.write_all(&[self.width, self.height])?;
        out.write_all(&self.tiles)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MapError> {
        let mut out = Vec::with_capacity(MAP_HEADER_SIZE + PLAYER_RECORD_SIZE + 2 + self.tiles.len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MapError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    // ------------------------------------------------------------------ //
    // Accessors
    // ------------------------------------------------------------------ //

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[inline]
    pub fn grid(&self) -> GridView<'_> {
        GridView::from_validated(self.width, self.height, &self.tiles)
    }

    #[inline]
    pub fn player_record(&self) -> PlayerRecord {
        self.player
    }

    /// Player start with the default field of view.
    pub fn player(&self) -> PlayerState {
        self.player_with_fov(crate::config::FOV_SCALE)
    }

    pub fn player_with_fov(&self, fov_scale: Fixed) -> PlayerState {
        let p = self.player;
        PlayerState::with_fov(
            (Fixed::from_raw(p.pos_x), Fixed::from_raw(p.pos_y)),
            (Fixed::from_raw(p.dir_x), Fixed::from_raw(p.dir_y)),
            fov_scale,
        )
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn fx(v: f32) -> Fixed {
        Fixed::from_f32(v)
    }

    #[rustfmt::skip]
    const ROOM4: [u8; 16] = [
        1, 1, 1, 1,
        1, 0, 0, 2,
        1, 0, 0, 2,
        1, 1, 3, 1,
    ];

    fn room() -> MapFile {
        MapFile::new(4, 4, ROOM4.to_vec(), (fx(1.5), fx(2.25)), (Fixed::ONE, Fixed::ZERO)).unwrap()
    }

    /// Hand-written blob, independent of the encoder.
    fn handmade() -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(b"MAP0");
        b.extend(&MAP_VERSION.to_le_bytes());
        b.extend(&20u32.to_le_bytes()); // player_offset
        b.extend(&36u32.to_le_bytes()); // map_offset
        b.extend(&0u32.to_le_bytes());
        for v in [fx(1.5), fx(2.25), -Fixed::ONE, Fixed::ZERO] {
            b.extend(&v.raw().to_le_bytes());
        }
        b.extend([4, 4]);
        b.extend(ROOM4);
        b
    }

    #[test]
    fn magic_matches_ascii_tag() {
        assert_eq!(MAP_MAGIC, 0x3050_414D);
    }

    #[test]
    fn decodes_handmade_blob() {
        let map = MapFile::from_bytes(&handmade()).unwrap();
        assert_eq!(map.version(), MAP_VERSION);

        let grid = map.grid();
        assert_eq!((grid.width(), grid.height()), (4, 4));
        assert_eq!(grid.tile(1, 3), 2);
        assert_eq!(grid.tile(3, 2), 3);

        let p = map.player();
        assert_eq!(p.pos(), (fx(1.5), fx(2.25)));
        assert_eq!(p.dir(), (-Fixed::ONE, Fixed::ZERO));
    }

    #[test]
    fn encoder_writes_same_layout() {
        let map = MapFile::from_bytes(&handmade()).unwrap();
        assert_eq!(map.to_bytes().unwrap(), handmade());
    }

    #[test]
    fn offsets_are_honoured() {
        // player record moved behind the tiles, with padding in between
        let mut b = handmade();
        let player: Vec<u8> = b[20..36].to_vec();
        b.drain(20..36);
        b[12..16].copy_from_slice(&20u32.to_le_bytes()); // map_offset
        b.extend([0xAA; 3]);
        let player_offset = b.len() as u32;
        b.extend(player);
        b[8..12].copy_from_slice(&player_offset.to_le_bytes());

        let map = MapFile::from_bytes(&b).unwrap();
        assert_eq!(map.player().pos(), (fx(1.5), fx(2.25)));
        assert_eq!(map.grid().tiles(), &ROOM4);
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut b = handmade();
        b[..4].copy_from_slice(b"XIP0");
        assert!(matches!(MapFile::from_bytes(&b), Err(MapError::BadMagic(0x3050_4958))));
    }

    #[test]
    fn unknown_version_still_loads() {
        let mut b = handmade();
        b[4..8].copy_from_slice(&200_000u32.to_le_bytes());
        assert_eq!(MapFile::from_bytes(&b).unwrap().version(), 200_000);
    }

    #[test]
    fn rejects_truncation() {
        let b = handmade();
        assert!(matches!(
            MapFile::from_bytes(&b[..10]),
            Err(MapError::Truncated { what: "header", .. })
        ));
        assert!(matches!(
            MapFile::from_bytes(&b[..b.len() - 1]),
            Err(MapError::Truncated { what: "tiles", .. })
        ));

        let mut far = b.clone();
        far[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            MapFile::from_bytes(&far),
            Err(MapError::Truncated { what: "player record", .. })
        ));
    }

    #[test]
    fn rejects_open_border() {
        let mut tiles = ROOM4.to_vec();
        tiles[2] = 0; // (0,2)
        let err = MapFile::new(4, 4, tiles, (fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::ZERO));
        assert!(matches!(err, Err(MapError::OpenBorder { x: 0, y: 2 })));
    }

    #[test]
    fn rejects_bad_grids() {
        let start = (fx(1.5), fx(1.5));
        let east = (Fixed::ONE, Fixed::ZERO);
        assert!(matches!(
            MapFile::new(0, 4, vec![], start, east),
            Err(MapError::EmptyGrid { width: 0, height: 4 })
        ));
        assert!(matches!(
            MapFile::new(4, 4, vec![1; 15], start, east),
            Err(MapError::TileCount { expected: 16, actual: 15, .. })
        ));
    }

    #[test]
    fn player_must_start_inside_the_ring() {
        let east = (Fixed::ONE, Fixed::ZERO);
        for pos in [(fx(0.5), fx(1.5)), (fx(1.5), fx(3.0)), (fx(-1.0), fx(1.5))] {
            assert!(matches!(
                MapFile::new(4, 4, ROOM4.to_vec(), pos, east),
                Err(MapError::PlayerOutside { .. })
            ));
        }
        assert!(MapFile::new(4, 4, ROOM4.to_vec(), (Fixed::ONE, fx(2.99)), east).is_ok());
    }

    #[test]
    fn rejects_zero_direction() {
        let err = MapFile::new(4, 4, ROOM4.to_vec(), (fx(1.5), fx(1.5)), (Fixed::ZERO, Fixed::ZERO));
        assert!(matches!(err, Err(MapError::ZeroDirection)));
    }

    #[test]
    fn file_round_trip() {
        let map = room();
        let tmp = tempfile::NamedTempFile::new().expect("tempfile");
        map.save(tmp.path()).unwrap();
        assert_eq!(MapFile::from_file(tmp.path()).unwrap(), map);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = MapFile::from_file(dir.path().join("nope.xip")).unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }
}
