mod grid;
mod player;
mod texture;

pub use grid::GridView;

pub use player::PlayerState;

pub use texture::{
    Rgb565, TEX_AREA, TEX_LOG2_SIZE, TEX_MASK, TEX_SIZE, TEX_SIZE_FX, TextureError, TextureStore,
    darken, rgb565, rgb565_to_rgb888,
};
