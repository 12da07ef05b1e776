//! # XIP0 texture pack
//!
//! ```text
//! header   magic u32 "XIP0" | version u32 | count u32 | reserved u32
//! table    offsets u32[count]       byte offset of each texture from blob start
//! texels   TEX_SIZE * TEX_SIZE RGB565 u16 per texture, column-major
//! ```
//!
//! Offsets need not be contiguous or ordered; decoding gathers every
//! texture into one contiguous block so [`TextureStore`] can index it.

use bincode::{Decode, Encode, decode_from_slice, encode_into_std_write};
use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use log::{info, warn};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use thiserror::Error;

use super::{bin_config, section};
use crate::world::{Rgb565, TEX_AREA, TEX_SIZE, TextureError, TextureStore};

/// `b"XIP0"` read as a little-endian `u32`.
pub const XIP_MAGIC: u32 = u32::from_le_bytes(*b"XIP0");
pub const XIP_VERSION: u32 = 1;

pub const XIP_HEADER_SIZE: usize = 16;
/// Bytes of texel data per texture.
pub const TEXTURE_BYTES: usize = TEX_AREA * 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Decode, Encode)]
pub struct XipHeader {
    pub magic: u32,
    pub version: u32,
    pub count: u32,
    pub reserved: u32,
}

/// Texture pack loading errors.
#[derive(Error, Debug)]
pub enum TextureFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a XIP0 blob (magic {0:#010x})")]
    BadMagic(u32),

    #[error("header decode: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("header encode: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("blob of {0} bytes is too short for a header")]
    ShortHeader(usize),

    #[error("texture pack declares no textures")]
    NoTextures,

    #[error("offset table for {count} textures runs past end of blob ({size} bytes)")]
    TableOutOfBounds { count: u32, size: usize },

    #[error("texture {index} at offset {offset} runs past end of blob ({size} bytes)")]
    BadOffset {
        index: usize,
        offset: u32,
        size: usize,
    },

    #[error(transparent)]
    Store(#[from] TextureError),
}

/// A decoded texture pack, texels gathered contiguously.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureFile {
    version: u32,
    texels: Vec<Rgb565>,
}

impl TextureFile {
    /// Wrap `count * TEX_AREA` texels (current version).
    pub fn new(texels: Vec<Rgb565>) -> Result<Self, TextureFileError> {
        TextureStore::new(&texels)?;
        Ok(Self {
            version: XIP_VERSION,
            texels,
        })
    }

    /// Concatenate whole textures.
    pub fn from_textures<I>(textures: I) -> Result<Self, TextureFileError>
    where
        I: IntoIterator,
        I::Item: AsRef<[Rgb565]>,
    {
        let mut texels = Vec::new();
        for t in textures {
            let t = t.as_ref();
            if t.len() != TEX_AREA {
                return Err(TextureError::Ragged(t.len()).into());
            }
            texels.extend_from_slice(t);
        }
        Self::new(texels)
    }

    // ------------------------------------------------------------------ //
    // Loading
    // ------------------------------------------------------------------ //

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureFileError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureFileError> {
        /*----------- 1. header --------------------------------------------*/
        let head = section(bytes, 0, XIP_HEADER_SIZE)
            .ok_or(TextureFileError::ShortHeader(bytes.len()))?;
        let (header, _) = decode_from_slice::<XipHeader, _>(head, bin_config())?;
        if header.magic != XIP_MAGIC {
            return Err(TextureFileError::BadMagic(header.magic));
        }
        if header.version != XIP_VERSION {
            warn!(
                "texture pack version {} differs from supported {XIP_VERSION}",
                header.version
            );
        }
        if header.count == 0 {
            return Err(TextureFileError::NoTextures);
        }

        /*----------- 2. offset table --------------------------------------*/
        let count = header.count as usize;
        let mut table = count
            .checked_mul(4)
            .and_then(|len| section(bytes, XIP_HEADER_SIZE, len))
            .ok_or(TextureFileError::TableOutOfBounds {
                count: header.count,
                size: bytes.len(),
            })?;

        let mut slices = Vec::with_capacity(count);
        for index in 0..count {
            let offset = table.read_u32::<LE>()?;
            let slice = section(bytes, offset as usize, TEXTURE_BYTES).ok_or(
                TextureFileError::BadOffset {
                    index,
                    offset,
                    size: bytes.len(),
                },
            )?;
            slices.push(slice);
        }

        /*----------- 3. gather texels -------------------------------------*/
        let mut texels = vec![0; count * TEX_AREA];
        for (mut src, dst) in slices.into_iter().zip(texels.chunks_exact_mut(TEX_AREA)) {
            src.read_u16_into::<LE>(dst)?;
        }

        info!(
            "texture pack v{}: {} textures of {TEX_SIZE}x{TEX_SIZE}",
            header.version, count
        );
        Ok(Self {
            version: header.version,
            texels,
        })
    }

    // ------------------------------------------------------------------ //
    // Encoding
    // ------------------------------------------------------------------ //

    /// Header, a contiguous offset table, then the texels in order.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), TextureFileError> {
        let count = self.len() as u32;
        let header = XipHeader {
            magic: XIP_MAGIC,
            version: self.version,
            count,
            reserved: 0,
        };
        encode_into_std_write(header, &mut out, bin_config())?;

        let first = (XIP_HEADER_SIZE + 4 * self.len()) as u32;
        for i in 0..count {
            out.write_u32::<LE>(first + i * TEXTURE_BYTES as u32)?;
        }
        for &t in &self.texels {
            out.write_u16::<LE>(t)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TextureFileError> {
        let mut out = Vec::with_capacity(XIP_HEADER_SIZE + 4 * self.len() + 2 * self.texels.len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TextureFileError> {
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

    /// Number of textures.
    #[inline]
    pub fn len(&self) -> usize {
        self.texels.len() / TEX_AREA
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    #[inline]
    pub fn texels(&self) -> &[Rgb565] {
        &self.texels
    }

    #[inline]
    pub fn store(&self) -> TextureStore<'_> {
        TextureStore::from_validated(&self.texels)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
