use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use rectpack::Heuristic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings for one atlas packing session, usually kept in a TOML file next to
/// the tiles it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AtlasConfig {
    /// The size of every page packed from tiles of mixed sizes. Pages packed
    /// from uniform tiles are sized from the tiles instead.
    #[serde(default = "default_page_size")]
    pub page_size: (u32, u32),

    /// How the packer picks a free region for each tile.
    #[serde(default)]
    pub heuristic: Heuristic,

    /// If set, a page is closed once it holds this many tiles even if it has
    /// room left.
    #[serde(default)]
    pub max_tiles_per_page: Option<usize>,

    /// Whether to drop free regions contained in other free regions after
    /// every insert.
    #[serde(default)]
    pub prune_free_regions: bool,

    /// Whether to bleed tile colors into transparent pixels when a page is
    /// finalized.
    #[serde(default)]
    pub bleed_alpha: bool,

    /// What to produce when there's nothing to pack.
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            heuristic: Heuristic::default(),
            max_tiles_per_page: None,
            prune_free_regions: false,
            bleed_alpha: false,
            fallback: FallbackConfig::default(),
        }
    }
}

impl AtlasConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: None,
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: Some(path.to_owned()),
            source,
        })?;
        config.validate()?;

        log::trace!("Read atlas config from {}", path.display());

        Ok(config)
    }

    /// Checks the values that serde can't: sizes must be non-zero and a tile
    /// cap, if any, must allow at least one tile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size.0 == 0 || self.page_size.1 == 0 {
            return Err(ConfigError::InvalidPageSize {
                size: self.page_size,
            });
        }

        if self.max_tiles_per_page == Some(0) {
            return Err(ConfigError::InvalidTileCap);
        }

        let fallback = &self.fallback;
        if fallback.size.0 == 0 || fallback.size.1 == 0 || fallback.cell_size == 0 {
            return Err(ConfigError::InvalidFallback {
                size: fallback.size,
                cell_size: fallback.cell_size,
            });
        }

        Ok(())
    }
}

fn default_page_size() -> (u32, u32) {
    (1024, 1024)
}

/// The checkerboard page used when an atlas ends up with no tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FallbackConfig {
    #[serde(default = "default_fallback_size")]
    pub size: (u32, u32),

    /// The width and height of each checker cell in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// The gray levels of the two alternating cells. The first one is used
    /// for the cell in the top-left corner.
    #[serde(default = "default_tones")]
    pub tones: (u8, u8),

    /// The name the fallback page is registered under.
    #[serde(default = "default_fallback_tile_id")]
    pub tile_id: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            size: default_fallback_size(),
            cell_size: default_cell_size(),
            tones: default_tones(),
            tile_id: default_fallback_tile_id(),
        }
    }
}

fn default_fallback_size() -> (u32, u32) {
    (64, 64)
}

fn default_cell_size() -> u32 {
    8
}

fn default_tones() -> (u8, u8) {
    (64, 128)
}

fn default_fallback_tile_id() -> String {
    "fallback".to_owned()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}{}", display_path(.path), .source)]
    Toml {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("atlas pages must have a non-zero size, got {size:?}")]
    InvalidPageSize { size: (u32, u32) },

    #[error("max-tiles-per-page must be at least 1")]
    InvalidTileCap,

    #[error("the fallback page needs a non-zero size and cell size, got {size:?} with {cell_size}px cells")]
    InvalidFallback { size: (u32, u32), cell_size: u32 },
}

impl ConfigError {
    /// Tells whether this error came from the config file not existing, so
    /// callers can fall back to `AtlasConfig::default()`.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("{}: ", path.display()),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = AtlasConfig::from_toml_str("").unwrap();

        assert_eq!(config, AtlasConfig::default());
        assert_eq!(config.page_size, (1024, 1024));
        assert_eq!(config.heuristic, Heuristic::BestAreaFit);
        assert_eq!(config.fallback.size, (64, 64));
        assert_eq!(config.fallback.cell_size, 8);
        assert_eq!(config.fallback.tones, (64, 128));
        assert_eq!(config.fallback.tile_id, "fallback");
    }

    #[test]
    fn full_file() {
        let config = AtlasConfig::from_toml_str(
            r#"
            page-size = [512, 256]
            heuristic = "best-short-side-fit"
            max-tiles-per-page = 64
            prune-free-regions = true
            bleed-alpha = true

            [fallback]
            size = [32, 32]
            cell-size = 4
            tones = [10, 20]
            tile-id = "missing"
            "#,
        )
        .unwrap();

        assert_eq!(config.page_size, (512, 256));
        assert_eq!(config.heuristic, Heuristic::BestShortSideFit);
        assert_eq!(config.max_tiles_per_page, Some(64));
        assert!(config.prune_free_regions);
        assert!(config.bleed_alpha);
        assert_eq!(
            config.fallback,
            FallbackConfig {
                size: (32, 32),
                cell_size: 4,
                tones: (10, 20),
                tile_id: "missing".to_owned(),
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = AtlasConfig::from_toml_str("page-sise = [1, 1]").unwrap_err();

        assert!(matches!(err, ConfigError::Toml { path: None, .. }));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = AtlasConfig::from_toml_str("page-size = [0, 64]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize { size: (0, 64) }));

        let err = AtlasConfig::from_toml_str("max-tiles-per-page = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTileCap));

        let err = AtlasConfig::from_toml_str("[fallback]\ncell-size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFallback { .. }));
    }

    #[test]
    fn missing_file() {
        let err = AtlasConfig::read_from_file("definitely/not/here/atlas.toml").unwrap_err();

        assert!(err.is_not_found());
    }
}
