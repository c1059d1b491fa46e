use std::{borrow::Borrow, fmt, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

/// The name a tile is registered and looked up under.
///
/// This is really just a string, but it's shared between the tile index and
/// every placement that refers to it, so it's reference counted to keep clones
/// cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(Arc<str>);

impl TileId {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        TileId(name.as_ref().into())
    }

    /// Derives a tile name from the path or resource name of its image by
    /// dropping the directories, any dotted namespace, and the extension.
    ///
    /// - `textures/terrain/tile040.png` becomes `tile040`
    /// - `editor.assets.sprite.terrain.tile040.png` becomes `tile040`
    pub fn from_resource_name<S: AsRef<str>>(resource: S) -> Self {
        let resource = resource.as_ref();

        let stem = Path::new(resource)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(resource);

        let name = stem.rsplit('.').next().unwrap_or(stem);

        TileId(name.into())
    }
}

impl AsRef<str> for TileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TileId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TileId {
    fn from(name: &str) -> Self {
        TileId(name.into())
    }
}

impl From<String> for TileId {
    fn from(name: String) -> Self {
        TileId(name.into())
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
