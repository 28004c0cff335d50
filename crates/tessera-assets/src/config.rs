use std::path::PathBuf;

use crate::state::{DropTime, LoadStyle, LoadTime};

/// Settings for one [`AssetHandler`](crate::AssetHandler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Directory that relative filenames are resolved against.
    pub base_path: PathBuf,
    /// Load time used by [`AssetHandle::new`](crate::AssetHandle::new).
    pub load_time: LoadTime,
    pub load_style: LoadStyle,
    pub drop_time: DropTime,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            load_time: LoadTime::Later,
            load_style: LoadStyle::FromFile,
            drop_time: DropTime::AtZero,
        }
    }
}

impl AssetConfig {
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_load_time(mut self, load_time: LoadTime) -> Self {
        self.load_time = load_time;
        self
    }

    pub fn with_load_style(mut self, load_style: LoadStyle) -> Self {
        self.load_style = load_style;
        self
    }

    pub fn with_drop_time(mut self, drop_time: DropTime) -> Self {
        self.drop_time = drop_time;
        self
    }
}
