//! Tessera Assets
//!
//! A reference-counted, lazily loaded asset cache.
//!
//! - [`AssetRegistry`] owns one [`AssetHandler`] per payload type.
//! - [`AssetHandler`] maps string ids to cache entries, counts references to
//!   each entry, and calls its [`AssetLoader`] to fill an entry from a file,
//!   from staged memory, or from the network.
//! - [`AssetHandle`] holds one reference to one entry for as long as it
//!   lives. Cloning it adds a reference and dropping it removes one.
//!
//! Loading is synchronous and single-threaded. A failed load never unwinds:
//! it is logged through `tracing`, the entry stays unloaded, and readers get
//! the payload type's default value.
//!
//! ```
//! use tessera_assets::{AssetRegistry, AssetHandle, TextLoader};
//!
//! let mut registry = AssetRegistry::new();
//! registry.register_loader(TextLoader).unwrap();
//!
//! let greeting = AssetHandle::<String>::new(&registry, "greeting").unwrap();
//! greeting.insert_memory(b"hello".to_vec());
//! greeting.set_load_style(tessera_assets::LoadStyle::FromMemory);
//! assert_eq!(greeting.get_asset().as_str(), "hello");
//! ```

pub mod config;
pub mod error;
pub mod handle;
pub mod handler;
pub mod io;
pub mod loader;
pub mod registry;
pub mod state;

pub use config::AssetConfig;
pub use error::{AssetError, AssetResult};
pub use handle::AssetHandle;
pub use handler::{AssetHandler, AssetRef};
pub use io::{FileReader, MemoryReader};
pub use loader::{AssetLoader, BytesLoader, LoadContext, TextLoader};
pub use registry::AssetRegistry;
pub use state::{DropTime, LoadStyle, LoadTime};

/// A payload type managed by an [`AssetHandler`].
///
/// `Default` supplies the placeholder value returned for entries that are
/// not loaded.
pub trait Asset: Default + 'static {
    /// Human-readable name used in diagnostics.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl Asset for String {
    fn type_name() -> &'static str {
        "String"
    }
}

impl Asset for Vec<u8> {
    fn type_name() -> &'static str {
        "Bytes"
    }
}
