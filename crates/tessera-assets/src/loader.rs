//! Load strategies.

use std::path::{Path, PathBuf};

use crate::Asset;
use crate::error::{AssetError, AssetResult};
use crate::io::{FileReader, MemoryReader};
use crate::state::LoadStyle;

/// Context provided to a loader for one load attempt.
pub struct LoadContext<'a> {
    id: &'a str,
    filename: &'a str,
    style: LoadStyle,
    files: &'a FileReader,
    memory: &'a MemoryReader,
}

impl<'a> LoadContext<'a> {
    pub fn new(
        id: &'a str,
        filename: &'a str,
        style: LoadStyle,
        files: &'a FileReader,
        memory: &'a MemoryReader,
    ) -> Self {
        Self {
            id,
            filename,
            style,
            files,
            memory,
        }
    }

    /// The id of the entry being loaded.
    pub fn id(&self) -> &'a str {
        self.id
    }

    /// The filename recorded for the entry. Defaults to the id.
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    pub fn style(&self) -> LoadStyle {
        self.style
    }

    /// The filename resolved against the handler's base path.
    pub fn path(&self) -> PathBuf {
        self.files.resolve_path(Path::new(self.filename))
    }

    /// Read the whole file named by [`filename`](Self::filename).
    pub fn read_file(&self) -> AssetResult<Vec<u8>> {
        self.files.read_bytes(Path::new(self.filename))
    }

    /// Read the block staged under this entry's id.
    pub fn read_memory(&self) -> AssetResult<&'a [u8]> {
        self.memory.read_bytes(self.id)
    }

    /// Build a [`AssetError::LoaderError`] for this entry.
    pub fn error(&self, message: impl Into<String>) -> AssetError {
        AssetError::LoaderError {
            path: self.id.to_string(),
            message: message.into(),
        }
    }

    fn unsupported(&self) -> AssetError {
        AssetError::UnsupportedLoadStyle {
            id: self.id.to_string(),
            style: self.style,
        }
    }
}

/// Loads and releases payloads of one asset type.
///
/// Only [`load_from_file`](Self::load_from_file) is required. The memory
/// and network strategies report [`AssetError::UnsupportedLoadStyle`]
/// unless overridden.
///
/// A loader is owned by its handler, so anything the payloads need to be
/// built (a renderer, a font size, a decoder) belongs in the loader struct.
///
/// # Example
///
/// ```
/// use tessera_assets::{Asset, AssetLoader, AssetResult, LoadContext};
///
/// #[derive(Default)]
/// struct Palette(Vec<u32>);
///
/// impl Asset for Palette {}
///
/// struct PaletteLoader {
///     alpha: u32,
/// }
///
/// impl AssetLoader for PaletteLoader {
///     type Asset = Palette;
///
///     fn load_from_file(&mut self, ctx: &LoadContext<'_>) -> AssetResult<Palette> {
///         let bytes = ctx.read_file()?;
///         Ok(Palette(bytes.iter().map(|&b| (b as u32) << 8 | self.alpha).collect()))
///     }
/// }
/// ```
pub trait AssetLoader: 'static {
    /// The asset type this loader produces.
    type Asset: Asset;

    fn load_from_file(&mut self, ctx: &LoadContext<'_>) -> AssetResult<Self::Asset>;

    fn load_from_memory(&mut self, ctx: &LoadContext<'_>) -> AssetResult<Self::Asset> {
        Err(ctx.unsupported())
    }

    fn load_from_network(&mut self, ctx: &LoadContext<'_>) -> AssetResult<Self::Asset> {
        Err(ctx.unsupported())
    }

    /// Called once for every loaded payload the handler lets go of, just
    /// before it is dropped.
    fn release(&mut self, _id: &str, _asset: &Self::Asset) {}
}

/// Loads UTF-8 text from files or memory.
pub struct TextLoader;

impl TextLoader {
    fn decode(ctx: &LoadContext<'_>, bytes: &[u8]) -> AssetResult<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| ctx.error(format!("Invalid UTF-8: {}", e)))
    }
}

impl AssetLoader for TextLoader {
    type Asset = String;

    fn load_from_file(&mut self, ctx: &LoadContext<'_>) -> AssetResult<String> {
        Self::decode(ctx, &ctx.read_file()?)
    }

    fn load_from_memory(&mut self, ctx: &LoadContext<'_>) -> AssetResult<String> {
        Self::decode(ctx, ctx.read_memory()?)
    }
}

/// Loads raw bytes from files or memory.
pub struct BytesLoader;

impl AssetLoader for BytesLoader {
    type Asset = Vec<u8>;

    fn load_from_file(&mut self, ctx: &LoadContext<'_>) -> AssetResult<Vec<u8>> {
        ctx.read_file()
    }

    fn load_from_memory(&mut self, ctx: &LoadContext<'_>) -> AssetResult<Vec<u8>> {
        Ok(ctx.read_memory()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with(id: &str, bytes: &[u8]) -> MemoryReader {
        let mut memory = MemoryReader::new();
        memory.insert(id, bytes.to_vec());
        memory
    }

    #[test]
    fn test_text_loader_from_memory() {
        let files = FileReader::default();
        let memory = memory_with("motd", b"Hello, World!");
        let ctx = LoadContext::new("motd", "motd", LoadStyle::FromMemory, &files, &memory);

        assert_eq!(TextLoader.load_from_memory(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_text_loader_rejects_invalid_utf8() {
        let files = FileReader::default();
        let memory = memory_with("bad", &[0xff, 0xfe]);
        let ctx = LoadContext::new("bad", "bad", LoadStyle::FromMemory, &files, &memory);

        let err = TextLoader.load_from_memory(&ctx).unwrap_err();
        assert!(matches!(err, AssetError::LoaderError { ref path, .. } if path == "bad"));
    }

    #[test]
    fn test_bytes_loader_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blob.bin"), [0u8, 1, 2, 3]).unwrap();

        let files = FileReader::new(dir.path());
        let memory = MemoryReader::new();
        let ctx = LoadContext::new("blob", "blob.bin", LoadStyle::FromFile, &files, &memory);

        assert_eq!(ctx.path(), dir.path().join("blob.bin"));
        assert_eq!(BytesLoader.load_from_file(&ctx).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_network_is_unsupported_by_default() {
        let files = FileReader::default();
        let memory = MemoryReader::new();
        let ctx = LoadContext::new("remote", "remote", LoadStyle::FromNetwork, &files, &memory);

        let err = BytesLoader.load_from_network(&ctx).unwrap_err();
        assert!(matches!(
            err,
            AssetError::UnsupportedLoadStyle {
                style: LoadStyle::FromNetwork,
                ..
            }
        ));
    }
}
