//! Assembly of a single atlas page: packing tiles, copying their pixels into
//! the page, and recording where each one landed.

use rectpack::{Packer, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    alpha_bleed::alpha_bleed, config::AtlasConfig, image::Image, tile_id::TileId, uv::UvRect,
};

/// Where a tile ended up in an atlas. Serializable so callers can store the
/// lookup table next to the page images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub tile_id: TileId,

    /// The index of the page within its atlas.
    pub page_index: usize,

    /// The pixels of the page covered by the tile.
    pub rect: Rect,

    /// `rect` in normalized page coordinates.
    pub uv: UvRect,
}

/// The lifecycle of a page. Pages only ever move forward through these
/// states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// The page is accepting tiles.
    Open,

    /// A tile didn't fit, or the page reached its tile cap. The page takes no
    /// more tiles and is waiting to be finalized.
    Full,

    /// The page's pixels are complete and ready to upload.
    Finalized,
}

/// Returned when the packer has no free region large enough for a tile.
///
/// This is the normal signal for the caller to move on to a new page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free region on the page is large enough")]
pub struct PackingExhausted;

/// A page that is still being packed. Owns its packer and pixel buffer.
#[derive(Debug)]
pub struct PageBuilder {
    index: usize,
    state: PageState,
    packer: Packer,
    pixels: Image,
    placements: Vec<Placement>,
    bleed_alpha: bool,
}

impl PageBuilder {
    /// Opens an empty page. Panics if either dimension of `size` is zero.
    pub fn new(index: usize, size: (u32, u32), config: &AtlasConfig) -> Self {
        log::debug!("Opening atlas page {} ({}x{})", index, size.0, size.1);

        let packer = Packer::new(size)
            .heuristic(config.heuristic)
            .prune_contained(config.prune_free_regions);

        Self {
            index,
            state: PageState::Open,
            packer,
            pixels: Image::new_empty_rgba8(size),
            placements: Vec::new(),
            bleed_alpha: config.bleed_alpha,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.pixels.size()
    }

    #[inline]
    pub fn state(&self) -> PageState {
        self.state
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Stops the page from accepting more tiles.
    pub fn mark_full(&mut self) {
        if self.state == PageState::Open {
            log::debug!(
                "Atlas page {} is full with {} tiles",
                self.index,
                self.placements.len()
            );

            self.state = PageState::Full;
        }
    }

    /// Packs `image` onto this page and copies its pixels in.
    ///
    /// If there's no room the page becomes `Full` and every later insert is
    /// refused too.
    pub fn insert(
        &mut self,
        tile_id: TileId,
        image: &Image,
    ) -> Result<Placement, PackingExhausted> {
        if self.state != PageState::Open {
            return Err(PackingExhausted);
        }

        let rect = match self.packer.insert(image.size()) {
            Some(rect) => rect,
            None => {
                self.mark_full();
                return Err(PackingExhausted);
            }
        };

        self.pixels.blit(image, rect.pos);

        let placement = Placement {
            tile_id,
            page_index: self.index,
            rect,
            uv: UvRect::from_rect(&rect, self.pixels.size()),
        };

        log::trace!(
            "Packed tile {} at {:?} on page {}",
            placement.tile_id,
            rect.pos,
            self.index
        );

        self.placements.push(placement.clone());

        Ok(placement)
    }

    /// Completes the page. No tiles can be added to it afterwards.
    pub fn finalize(self) -> AtlasPage {
        let mut pixels = self.pixels;

        if self.bleed_alpha {
            alpha_bleed(&mut pixels);
        }

        log::debug!(
            "Finalized atlas page {} ({}x{}) with {} tiles",
            self.index,
            pixels.width(),
            pixels.height(),
            self.placements.len()
        );

        AtlasPage {
            index: self.index,
            pixels,
            placements: self.placements,
        }
    }
}

/// A finished atlas page, ready to be handed off for upload.
#[derive(Debug, Clone)]
pub struct AtlasPage {
    index: usize,
    pixels: Image,
    placements: Vec<Placement>,
}

impl AtlasPage {
    pub(crate) fn from_parts(index: usize, pixels: Image, placements: Vec<Placement>) -> Self {
        Self {
            index,
            pixels,
            placements,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.pixels.size()
    }

    #[inline]
    pub fn state(&self) -> PageState {
        PageState::Finalized
    }

    /// The page as an image.
    #[inline]
    pub fn image(&self) -> &Image {
        &self.pixels
    }

    /// The page's RGBA8 bytes, row by row.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.pixels.data()
    }

    /// Tiles on this page, in the order they were packed.
    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn into_image(self) -> Image {
        self.pixels
    }
}
