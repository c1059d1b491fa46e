use std::collections::HashMap;

use thiserror::Error;

use crate::{
    config::{AtlasConfig, ConfigError, FallbackConfig},
    fallback::fallback_page,
    image::{Image, ImageError},
    page::{AtlasPage, PackingExhausted, PageBuilder, PageState, Placement},
    tile_id::TileId,
};

/// A packing session for tiles of any size on pages of one fixed size.
///
/// Tiles go onto the active page until it runs out of room or reaches the
/// configured tile cap. The page is then finalized and a fresh one opened.
/// Tiles that can't be packed at all are skipped and reported; they never
/// stop the rest of the session.
///
/// Dropping a registry without calling [`finish`](Self::finish) discards
/// every page it built.
#[derive(Debug)]
pub struct AtlasRegistry {
    config: AtlasConfig,
    finished: Vec<AtlasPage>,
    active: PageBuilder,
    tile_index: HashMap<TileId, Placement>,
    skipped: Vec<TileError>,
}

impl AtlasRegistry {
    pub fn new(config: AtlasConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let active = PageBuilder::new(0, config.page_size, &config);

        Ok(Self {
            config,
            finished: Vec::new(),
            active,
            tile_index: HashMap::new(),
            skipped: Vec::new(),
        })
    }

    /// Packs a tile given as raw RGBA8 bytes.
    pub fn add_rgba8<I, D>(
        &mut self,
        tile_id: I,
        size: (u32, u32),
        pixels: D,
    ) -> Result<Placement, TileError>
    where
        I: Into<TileId>,
        D: Into<Vec<u8>>,
    {
        let tile_id = tile_id.into();

        match Image::new_rgba8(size, pixels) {
            Ok(image) => self.add_tile(tile_id, image),
            Err(source) => Err(self.skip(TileError::InvalidPixelBuffer { tile_id, source })),
        }
    }

    /// Packs a tile onto the active page, rolling over to a new page if the
    /// active one can't take it.
    pub fn add_tile<I: Into<TileId>>(
        &mut self,
        tile_id: I,
        image: Image,
    ) -> Result<Placement, TileError> {
        let tile_id = tile_id.into();

        match self.place(tile_id, &image) {
            Ok(placement) => Ok(placement),
            Err(err) => Err(self.skip(err)),
        }
    }

    fn place(&mut self, tile_id: TileId, image: &Image) -> Result<Placement, TileError> {
        check_tile(&tile_id, image, self.config.page_size)?;

        if self.tile_index.contains_key(&tile_id) {
            return Err(TileError::DuplicateTile { tile_id });
        }

        if let Some(cap) = self.config.max_tiles_per_page {
            if self.active.len() >= cap {
                self.active.mark_full();
                self.roll_over();
            }
        }

        let placement = match self.active.insert(tile_id.clone(), image) {
            Ok(placement) => placement,
            Err(PackingExhausted) => {
                log::debug!(
                    "Tile {} didn't fit on page {}, starting a new page",
                    tile_id,
                    self.active.index()
                );

                self.roll_over();
                self.active
                    .insert(tile_id.clone(), image)
                    .map_err(|_| TileError::TooLargeForPage {
                        tile_id: tile_id.clone(),
                        tile_size: image.size(),
                        page_size: self.config.page_size,
                    })?
            }
        };

        self.tile_index.insert(tile_id, placement.clone());

        Ok(placement)
    }

    /// Finalizes the active page and opens a fresh one in its place. A page
    /// with no tiles on it is dropped rather than finalized.
    fn roll_over(&mut self) {
        let index = self.finished.len();
        let next_index = if self.active.is_empty() { index } else { index + 1 };

        let fresh = PageBuilder::new(next_index, self.config.page_size, &self.config);
        let previous = std::mem::replace(&mut self.active, fresh);

        if !previous.is_empty() {
            self.finished.push(previous.finalize());
        }
    }

    fn skip(&mut self, err: TileError) -> TileError {
        log::warn!("Skipping tile: {}", err);
        self.skipped.push(err.clone());
        err
    }

    pub fn lookup(&self, tile_id: &str) -> Option<&Placement> {
        self.tile_index.get(tile_id)
    }

    /// The number of pages holding at least one tile, including the active
    /// one.
    pub fn page_count(&self) -> usize {
        self.finished.len() + if self.active.is_empty() { 0 } else { 1 }
    }

    pub fn page_state(&self, index: usize) -> Option<PageState> {
        if index < self.finished.len() {
            Some(PageState::Finalized)
        } else if index == self.active.index() && !self.active.is_empty() {
            Some(self.active.state())
        } else {
            None
        }
    }

    pub fn tile_count(&self) -> usize {
        self.tile_index.len()
    }

    /// Tiles that couldn't be packed so far.
    pub fn skipped(&self) -> &[TileError] {
        &self.skipped
    }

    /// Finalizes the last page and hands over every page and the lookup
    /// table. If no tile made it onto a page, the atlas holds the fallback
    /// page instead.
    pub fn finish(self) -> Atlas {
        let AtlasRegistry {
            config,
            mut finished,
            active,
            tile_index,
            skipped,
        } = self;

        if !active.is_empty() {
            finished.push(active.finalize());
        }

        Atlas::from_parts(finished, tile_index, skipped, &config.fallback)
    }
}

/// Checks everything about a tile that doesn't depend on what's already
/// packed.
pub(crate) fn check_tile(
    tile_id: &TileId,
    image: &Image,
    page_size: (u32, u32),
) -> Result<(), TileError> {
    let size = image.size();

    if size.0 == 0 || size.1 == 0 {
        return Err(TileError::EmptyTile {
            tile_id: tile_id.clone(),
        });
    }

    if size.0 > page_size.0 || size.1 > page_size.1 {
        return Err(TileError::TooLargeForPage {
            tile_id: tile_id.clone(),
            tile_size: size,
            page_size,
        });
    }

    Ok(())
}

/// The finished result of packing: every page plus the table mapping tile
/// names to where they ended up. Nothing in an atlas changes after it's built.
#[derive(Debug, Clone)]
pub struct Atlas {
    pages: Vec<AtlasPage>,
    tile_index: HashMap<TileId, Placement>,
    skipped: Vec<TileError>,
    fallback: bool,
}

impl Atlas {
    pub(crate) fn from_parts(
        mut pages: Vec<AtlasPage>,
        mut tile_index: HashMap<TileId, Placement>,
        skipped: Vec<TileError>,
        fallback_config: &FallbackConfig,
    ) -> Self {
        let fallback = pages.is_empty();

        if fallback {
            log::info!(
                "No tiles were packed, using a {}x{} checkerboard fallback page",
                fallback_config.size.0,
                fallback_config.size.1
            );

            let (page, placement) = fallback_page(fallback_config);
            tile_index.insert(placement.tile_id.clone(), placement);
            pages.push(page);
        } else {
            log::info!(
                "Packed {} tiles into {} atlas pages",
                tile_index.len(),
                pages.len()
            );
        }

        Self {
            pages,
            tile_index,
            skipped,
            fallback,
        }
    }

    pub fn lookup(&self, tile_id: &str) -> Option<&Placement> {
        self.tile_index.get(tile_id)
    }

    #[inline]
    pub fn pages(&self) -> &[AtlasPage] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&AtlasPage> {
        self.pages.get(index)
    }

    pub fn tile_count(&self) -> usize {
        self.tile_index.len()
    }

    /// Every registered tile, in no particular order.
    pub fn tiles(&self) -> impl Iterator<Item = &Placement> {
        self.tile_index.values()
    }

    /// Tiles that were left out of the atlas, with the reason for each.
    #[inline]
    pub fn skipped(&self) -> &[TileError] {
        &self.skipped
    }

    /// Whether this atlas is the checkerboard stand-in for an empty input.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Gives up the lookup table and returns the pages, for callers that only
    /// need the pixels from here on.
    pub fn into_pages(self) -> Vec<AtlasPage> {
        self.pages
    }
}

/// Why a tile was left out of an atlas. None of these stop other tiles from
/// being packed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("tile {tile_id} of size {tile_size:?} doesn't fit on an atlas page of size {page_size:?}")]
    TooLargeForPage {
        tile_id: TileId,
        tile_size: (u32, u32),
        page_size: (u32, u32),
    },

    #[error("tile {tile_id} has no pixels")]
    EmptyTile { tile_id: TileId },

    #[error("tile {tile_id} has invalid pixel data: {source}")]
    InvalidPixelBuffer { tile_id: TileId, source: ImageError },

    #[error("tile {tile_id} was already added to the atlas")]
    DuplicateTile { tile_id: TileId },

    #[error("tile {tile_id} is {actual:?} but this atlas only takes {expected:?} tiles")]
    MismatchedTileSize {
        tile_id: TileId,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl TileError {
    pub fn tile_id(&self) -> &TileId {
        match self {
            TileError::TooLargeForPage { tile_id, .. }
            | TileError::EmptyTile { tile_id }
            | TileError::InvalidPixelBuffer { tile_id, .. }
            | TileError::DuplicateTile { tile_id }
            | TileError::MismatchedTileSize { tile_id, .. } => tile_id,
        }
    }
}
