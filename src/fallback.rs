use rectpack::Rect;

use crate::{
    config::FallbackConfig,
    image::{Image, Pixel},
    page::{AtlasPage, Placement},
    tile_id::TileId,
    uv::UvRect,
};

/// Draws the fallback checkerboard. The cell at the top-left corner uses the
/// first tone, and cells alternate in both directions.
pub fn checkerboard(config: &FallbackConfig) -> Image {
    let (width, height) = config.size;
    let mut image = Image::new_empty_rgba8(config.size);

    for y in 0..height {
        for x in 0..width {
            let even = ((x / config.cell_size) + (y / config.cell_size)) % 2 == 0;
            let tone = if even { config.tones.0 } else { config.tones.1 };

            image.set_pixel((x, y), Pixel::new(tone, tone, tone, 255));
        }
    }

    image
}

/// Builds the single page an atlas falls back to when it has no tiles, along
/// with the placement of the synthetic tile that covers all of it.
pub(crate) fn fallback_page(config: &FallbackConfig) -> (AtlasPage, Placement) {
    let placement = Placement {
        tile_id: TileId::new(&config.tile_id),
        page_index: 0,
        rect: Rect::new((0, 0), config.size),
        uv: UvRect::FULL,
    };

    let page = AtlasPage::from_parts(0, checkerboard(config), vec![placement.clone()]);

    (page, placement)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_checkerboard() {
        let image = checkerboard(&FallbackConfig::default());

        assert_eq!(image.size(), (64, 64));

        let dark = Pixel::new(64, 64, 64, 255);
        let light = Pixel::new(128, 128, 128, 255);

        assert_eq!(image.get_pixel((0, 0)), dark);
        assert_eq!(image.get_pixel((7, 7)), dark);
        assert_eq!(image.get_pixel((8, 0)), light);
        assert_eq!(image.get_pixel((0, 8)), light);
        assert_eq!(image.get_pixel((8, 8)), dark);
        assert_eq!(image.get_pixel((63, 0)), light);
        assert_eq!(image.get_pixel((63, 63)), dark);
    }

    #[test]
    fn checkerboard_is_deterministic() {
        let config = FallbackConfig::default();

        assert_eq!(checkerboard(&config), checkerboard(&config));
    }

    #[test]
    fn fallback_page_covers_everything() {
        let (page, placement) = fallback_page(&FallbackConfig::default());

        assert_eq!(page.size(), (64, 64));
        assert_eq!(placement.tile_id.as_ref(), "fallback");
        assert_eq!(placement.uv, UvRect::FULL);
        assert_eq!(page.placements(), &[placement]);
    }
}
