mod utils;

pub mod color;
pub mod config;
pub mod effects;
pub mod field;
pub mod host;
pub mod particle;
pub mod pointer;
pub mod surface;

use log::Level;
use wasm_bindgen::prelude::*;

pub use color::Color;
pub use config::FieldConfig;
pub use field::{Connection, ParticleField, SimContext, Viewport};
pub use host::ParticleCanvas;
pub use particle::Particle;
pub use pointer::PointerState;
pub use surface::{CanvasSurface, DrawCommand, RecordingSurface, Surface};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub const BANNER: [&str; 3] = [
    "⚡ Portfolio GOD MODE v3.0 Activated ⚡",
    " Built by a Machine Intelligence Architect 🚀",
    " Features: Preloader | Custom Cursor | Particles | Glitch Text | 3D Cards | Parallax",
];

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    utils::init_logging(level);
    for line in BANNER.iter() {
        log::info!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_has_three_lines() {
        assert_eq!(BANNER.len(), 3);
        assert!(BANNER[0].contains("Portfolio GOD MODE v3.0 Activated"));
        assert!(BANNER[1].contains("Machine Intelligence Architect"));
        assert!(BANNER[2].starts_with(" Features: Preloader | Custom Cursor | Particles"));
    }
}
