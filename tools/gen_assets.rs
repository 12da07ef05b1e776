//! gen_assets.rs - write the built-in demo level and texture pack to disk.
//!
//! USAGE:
//! ```bash
//! cargo run --bin gen_assets -- --out-dir ./assets
//! ```

use anyhow::Context;
use clap::Parser;
use log::info;
use std::{fs, path::PathBuf};

use yarc_rs::xip::{AssetError, demo};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Directory receiving `map.xip` and `textures.xip`
    #[arg(long, value_name = "DIR", default_value = "./assets")]
    out_dir: PathBuf,

    /// Only write the texture pack
    #[arg(long)]
    textures_only: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("creating {}", opts.out_dir.display()))?;

    let textures = demo::textures()?;
    let tex_path = opts.out_dir.join("textures.xip");
    textures.save(&tex_path)?;
    for (i, (name, _)) in demo::PATTERNS.iter().enumerate() {
        info!("  {:>2}: {name}, {:>2}: {name}_shaded", 2 * i, 2 * i + 1);
    }
    info!("wrote {} ({} textures)", tex_path.display(), textures.len());

    if opts.textures_only {
        return Ok(());
    }

    let map = demo::map()?;
    AssetError::check_textures(&map.grid(), &textures.store())?;
    let map_path = opts.out_dir.join("map.xip");
    map.save(&map_path)?;
    info!(
        "wrote {} ({}x{})",
        map_path.display(),
        map.grid().width(),
        map.grid().height()
    );
    Ok(())
}
