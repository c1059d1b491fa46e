use rectpack::Rect;
use serde::{Deserialize, Serialize};

/// Normalized texture coordinates of a tile within its atlas page.
///
/// `(u1, v1)` is the top-left corner and `(u2, v2)` the bottom-right corner,
/// both in `[0, 1]` with the origin at the top-left of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

impl UvRect {
    /// The UV rectangle covering a whole page.
    pub const FULL: UvRect = UvRect {
        u1: 0.0,
        v1: 0.0,
        u2: 1.0,
        v2: 1.0,
    };

    pub fn from_rect(rect: &Rect, page_size: (u32, u32)) -> Self {
        let (max_x, max_y) = rect.max();
        let (width, height) = (page_size.0 as f32, page_size.1 as f32);

        UvRect {
            u1: rect.pos.0 as f32 / width,
            v1: rect.pos.1 as f32 / height,
            u2: max_x as f32 / width,
            v2: max_y as f32 / height,
        }
    }

    /// Maps a coordinate local to the tile, in `[0, 1]`, to page coordinates.
    pub fn transform(&self, local: (f32, f32)) -> (f32, f32) {
        (
            self.u1 + (self.u2 - self.u1) * local.0,
            self.v1 + (self.v2 - self.v1) * local.1,
        )
    }

    /// The pixel size this rectangle covers on a page of the given size.
    pub fn pixel_size(&self, page_size: (u32, u32)) -> (u32, u32) {
        (
            ((self.u2 - self.u1) * page_size.0 as f32).round() as u32,
            ((self.v2 - self.v1) * page_size.1 as f32).round() as u32,
        )
    }
}
