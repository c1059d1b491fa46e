//! Tilesmith packs tile images into texture atlas pages for block-based scene
//! editors.
//!
//! Tiles of mixed sizes go through an [`AtlasRegistry`], which packs them onto
//! fixed-size pages and rolls over to a new page whenever the current one runs
//! out of room. Sets of identically sized tiles can instead go through
//! [`pack_uniform`], which lays them out on square grids.
//!
//! Either way the result is an [`Atlas`]: a list of finished RGBA8 pages plus
//! the page index, pixel rectangle, and UV rectangle of every tile. An atlas
//! with no tiles at all holds a single checkerboard page so that renderers
//! always have something to bind.
//!
//! ## Example
//! ```
//! use tilesmith::{AtlasConfig, AtlasRegistry};
//!
//! let config = AtlasConfig {
//!     page_size: (32, 32),
//!     ..AtlasConfig::default()
//! };
//!
//! let mut registry = AtlasRegistry::new(config).unwrap();
//! registry.add_rgba8("stone", (16, 16), vec![128; 16 * 16 * 4]).unwrap();
//! registry.add_rgba8("dirt", (16, 16), vec![64; 16 * 16 * 4]).unwrap();
//!
//! let atlas = registry.finish();
//! let dirt = atlas.lookup("dirt").unwrap();
//!
//! assert_eq!(atlas.pages().len(), 1);
//! assert_eq!(dirt.rect.pos, (16, 0));
//! assert_eq!(dirt.uv.u1, 0.5);
//! ```

mod alpha_bleed;
mod config;
mod fallback;
mod image;
mod page;
mod registry;
mod sequence;
mod tile_id;
mod uniform;
mod uv;

pub use rectpack::{Heuristic, Rect};

pub use crate::config::{AtlasConfig, ConfigError, FallbackConfig};
pub use crate::fallback::checkerboard;
pub use crate::image::{Image, ImageError, Pixel};
pub use crate::page::{AtlasPage, PackingExhausted, PageBuilder, PageState, Placement};
pub use crate::registry::{Atlas, AtlasRegistry, TileError};
pub use crate::sequence::{SequenceError, TileSequence};
pub use crate::tile_id::TileId;
pub use crate::uniform::{pack_uniform, DEFAULT_TILES_PER_UNIFORM_PAGE};
pub use crate::uv::UvRect;
