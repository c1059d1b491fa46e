//! Rectpack is a small library for packing rectangles into fixed-size bins.
//! It was built for Tilesmith, which packs tile images into texture atlas
//! pages.
//!
//! Rectpack keeps the free space of a bin as a list of possibly overlapping
//! free regions. Each insert picks the best region according to a
//! [`Heuristic`], places the item at that region's origin, and splits every
//! free region the item overlaps into the strips around it.
//!
//! ## Example
//! ```
//! use rectpack::{Heuristic, Packer, Rect};
//!
//! // Construct a packer for one bin and configure how it picks regions.
//! let mut packer = Packer::new((128, 128)).heuristic(Heuristic::BestAreaFit);
//!
//! // Insert items one at a time. Each successful insert returns where the
//! // item ended up.
//! assert_eq!(packer.insert((64, 64)), Some(Rect::new((0, 0), (64, 64))));
//! assert_eq!(packer.insert((64, 64)), Some(Rect::new((64, 0), (64, 64))));
//!
//! // When nothing fits anymore, insert returns None and the caller can
//! // start a new bin.
//! assert_eq!(packer.insert((128, 128)), None);
//! ```

mod free_list;
mod geometry;
mod heuristic;
mod packer;

pub use free_list::*;
pub use geometry::*;
pub use heuristic::*;
pub use packer::*;
