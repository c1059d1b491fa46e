//! Packing for sets of tiles that all share one size, such as the terrain
//! tiles of a block editor. Instead of a fixed page size, every page is a
//! square grid just big enough for the tiles assigned to it.

use std::collections::{HashMap, HashSet};

use crate::{
    config::{AtlasConfig, ConfigError},
    image::Image,
    page::PageBuilder,
    registry::{check_tile, Atlas, TileError},
    tile_id::TileId,
};

/// How many tiles go on one page when the config sets no cap: an 8x8 grid.
pub const DEFAULT_TILES_PER_UNIFORM_PAGE: usize = 64;

/// Packs tiles of identical size into square-grid pages.
///
/// Tiles are taken in order, in groups of `max_tiles_per_page` (or
/// [`DEFAULT_TILES_PER_UNIFORM_PAGE`]). Each group's page is `side` tiles wide
/// and tall, where `side = ceil(sqrt(group size))`. The tile size is taken
/// from the first valid tile; tiles of any other size are skipped. The
/// config's `page_size` is not used.
pub fn pack_uniform<I, T>(config: &AtlasConfig, tiles: I) -> Result<Atlas, ConfigError>
where
    I: IntoIterator<Item = (T, Image)>,
    T: Into<TileId>,
{
    config.validate()?;

    let mut skipped = Vec::new();
    let mut seen = HashSet::new();
    let mut tile_size = None;
    let mut accepted = Vec::new();

    for (tile_id, image) in tiles {
        let tile_id = tile_id.into();

        match check_uniform_tile(&tile_id, &image, &mut tile_size, &seen) {
            Ok(()) => {
                seen.insert(tile_id.clone());
                accepted.push((tile_id, image));
            }
            Err(err) => {
                log::warn!("Skipping tile: {}", err);
                skipped.push(err);
            }
        }
    }

    let tiles_per_page = config
        .max_tiles_per_page
        .unwrap_or(DEFAULT_TILES_PER_UNIFORM_PAGE);

    let mut pages = Vec::new();
    let mut tile_index = HashMap::new();

    if let Some(tile_size) = tile_size {
        for (page_index, group) in accepted.chunks(tiles_per_page).enumerate() {
            let side = grid_side(group.len());
            let page_size = (side * tile_size.0, side * tile_size.1);

            log::debug!(
                "Uniform page {} holds {} tiles in a {}x{} grid",
                page_index,
                group.len(),
                side,
                side
            );

            let mut page = PageBuilder::new(page_index, page_size, config);

            for (tile_id, image) in group {
                match page.insert(tile_id.clone(), image) {
                    Ok(placement) => {
                        tile_index.insert(tile_id.clone(), placement);
                    }
                    Err(_) => {
                        let err = TileError::TooLargeForPage {
                            tile_id: tile_id.clone(),
                            tile_size: image.size(),
                            page_size,
                        };

                        log::warn!("Skipping tile: {}", err);
                        skipped.push(err);
                    }
                }
            }

            pages.push(page.finalize());
        }
    }

    Ok(Atlas::from_parts(pages, tile_index, skipped, &config.fallback))
}

fn check_uniform_tile(
    tile_id: &TileId,
    image: &Image,
    tile_size: &mut Option<(u32, u32)>,
    seen: &HashSet<TileId>,
) -> Result<(), TileError> {
    let size = image.size();

    if seen.contains(tile_id) {
        return Err(TileError::DuplicateTile {
            tile_id: tile_id.clone(),
        });
    }

    match *tile_size {
        Some(expected) if expected != size => Err(TileError::MismatchedTileSize {
            tile_id: tile_id.clone(),
            expected,
            actual: size,
        }),
        Some(_) => Ok(()),
        None => {
            check_tile(tile_id, image, size)?;
            *tile_size = Some(size);
            Ok(())
        }
    }
}

/// The smallest `side` with `side * side >= count`.
fn grid_side(count: usize) -> u32 {
    let mut side = 1u32;

    while (side as usize) * (side as usize) < count {
        side += 1;
    }

    side
}
