use std::fmt;

use regex::Regex;
use thiserror::Error;

use crate::{image::Image, tile_id::TileId};

/// The most digits a sequence placeholder can have while every index still
/// fits in a `u32`.
const MAX_DIGITS: usize = 9;

/// A numbered family of tile names, described by a pattern like
/// `terrain/tile###.png` where the run of `#` stands for a zero-padded index.
///
/// - `tile###.png` names `tile000.png`, `tile001.png`, ... `tile999.png`
/// - `grass_#.png` names `grass_0.png` ... `grass_9.png`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSequence {
    prefix: String,
    digits: usize,
    suffix: String,
}

impl TileSequence {
    pub fn parse(pattern: &str) -> Result<Self, SequenceError> {
        lazy_static::lazy_static! {
            static ref PLACEHOLDER: Regex = Regex::new(r"#+").unwrap();
        }

        let placeholder = PLACEHOLDER
            .find(pattern)
            .ok_or_else(|| SequenceError::MissingPlaceholder {
                pattern: pattern.to_owned(),
            })?;

        let digits = placeholder.end() - placeholder.start();
        if digits > MAX_DIGITS {
            return Err(SequenceError::TooManyDigits {
                pattern: pattern.to_owned(),
                digits,
            });
        }

        Ok(Self {
            prefix: pattern[..placeholder.start()].to_owned(),
            digits,
            suffix: pattern[placeholder.end()..].to_owned(),
        })
    }

    #[inline]
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// The number of names in the sequence.
    pub fn len(&self) -> u32 {
        10u32.pow(self.digits as u32)
    }

    /// Always false: a sequence has at least one digit, so at least ten names.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self, index: u32) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            index,
            self.suffix,
            width = self.digits
        )
    }

    /// Every name in the sequence, in order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len()).map(move |index| self.name(index))
    }

    /// Loads tiles from the sequence in order until the first gap.
    ///
    /// `loader` is called with each name. It returns `Ok(None)` when nothing
    /// exists under that name, which ends the sequence. Errors from the
    /// loader are logged and that tile is left out, but loading continues.
    ///
    /// Tiles are identified by their full name, directory included, so
    /// sequences from different directories can share one atlas.
    pub fn load<F, E>(&self, mut loader: F) -> Vec<(TileId, Image)>
    where
        F: FnMut(&str) -> Result<Option<Image>, E>,
        E: fmt::Display,
    {
        let mut tiles = Vec::new();

        for name in self.names() {
            match loader(&name) {
                Ok(Some(image)) => {
                    log::trace!("Loaded sequence tile {}", name);
                    tiles.push((TileId::new(&name), image));
                }
                Ok(None) => {
                    log::debug!("No tile named {}, ending the sequence", name);
                    break;
                }
                Err(err) => {
                    log::warn!("Failed to load tile {}: {}", name, err);
                }
            }
        }

        tiles
    }
}

impl fmt::Display for TileSequence {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{}{}{}",
            self.prefix,
            "#".repeat(self.digits),
            self.suffix
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("tile sequence pattern {pattern:?} has no # placeholder")]
    MissingPlaceholder { pattern: String },

    #[error("tile sequence pattern {pattern:?} has {digits} digits, at most 9 are supported")]
    TooManyDigits { pattern: String, digits: usize },
}
