//! # `.xip` asset blobs
//!
//! Two little-endian blob formats, both read fully into memory and
//! validated once, before the render loop ever sees them:
//!
//! * **MAP0** – tile grid plus player start ([`MapFile`]).
//! * **XIP0** – RGB565 texture pack ([`TextureFile`]).
//!
//! [`Assets`] pairs them and checks that every wall tile can find both of
//! its textures.

pub mod demo;
mod map;
mod texture;

use bincode::config;
use std::path::Path;
use thiserror::Error;

use crate::world::{GridView, TextureStore};

pub use map::{
    MAP_HEADER_SIZE, MAP_MAGIC, MAP_VERSION, MapError, MapFile, MapHeader, PLAYER_RECORD_SIZE,
    PlayerRecord,
};
pub use texture::{
    TEXTURE_BYTES, TextureFile, TextureFileError, XIP_HEADER_SIZE, XIP_MAGIC, XIP_VERSION,
    XipHeader,
};

/// Fixed-width little-endian, the on-disk layout of every header.
#[inline]
pub(crate) fn bin_config() -> impl config::Config {
    config::standard()
        .with_fixed_int_encoding()
        .with_little_endian()
}

/// `bytes[offset .. offset + len]`, or `None` when it runs past the end.
#[inline]
pub(crate) fn section(bytes: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    let end = offset.checked_add(len)?;
    bytes.get(offset..end)
}

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum AssetError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Texture(#[from] TextureFileError),

    #[error(
        "tile {tile} at ({x},{y}) needs textures {} and {tile} but the pack has {count}",
        *tile as usize - 1
    )]
    MissingTexture { tile: u8, x: u8, y: u8, count: usize },
}

impl AssetError {
    /// Every wall tile `N` needs its base texture `N - 1` and its shaded
    /// texture `N`. Reports the first offending cell in column-major order.
    pub fn check_textures(grid: &GridView<'_>, textures: &TextureStore<'_>) -> Result<(), Self> {
        let count = textures.len();
        let h = grid.height() as usize;
        for (i, &tile) in grid.tiles().iter().enumerate() {
            if tile as usize >= count {
                return Err(Self::MissingTexture {
                    tile,
                    x: (i / h) as u8,
                    y: (i % h) as u8,
                    count,
                });
            }
        }
        Ok(())
    }
}

/*──────────────────────────── Asset pair ───────────────────────────*/

/// A map and the texture pack it is drawn with.
#[derive(Clone, Debug)]
pub struct Assets {
    map: MapFile,
    textures: TextureFile,
}

impl Assets {
    pub fn new(map: MapFile, textures: TextureFile) -> Result<Self, AssetError> {
        AssetError::check_textures(&map.grid(), &textures.store())?;
        Ok(Self { map, textures })
    }

    pub fn load<P, Q>(map: P, textures: Q) -> Result<Self, AssetError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self::new(MapFile::from_file(map)?, TextureFile::from_file(textures)?)
    }

    pub fn from_bytes(map: &[u8], textures: &[u8]) -> Result<Self, AssetError> {
        Self::new(MapFile::from_bytes(map)?, TextureFile::from_bytes(textures)?)
    }

    #[inline]
    pub fn map(&self) -> &MapFile {
        &self.map
    }

    #[inline]
    pub fn textures(&self) -> &TextureFile {
        &self.textures
    }
}
