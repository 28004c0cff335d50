//! Per-type asset cache with reference counting.

use std::cell::{OnceCell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

use tessera_core::alloc::HashMap;

use crate::Asset;
use crate::config::AssetConfig;
use crate::error::AssetError;
use crate::io::{FileReader, MemoryReader};
use crate::loader::{AssetLoader, LoadContext};
use crate::state::{DropTime, LoadStyle, LoadTime};

/// A shared view of one entry's payload.
///
/// Every reference to an entry shares the same slot, and a load fills that
/// slot in place. A reference taken before the load therefore reads the
/// loaded payload afterwards. Until then it reads as the placeholder.
pub struct AssetRef<T> {
    slot: Rc<OnceCell<T>>,
    placeholder: Rc<T>,
}

impl<T> AssetRef<T> {
    fn new(slot: &Rc<OnceCell<T>>, placeholder: &Rc<T>) -> Self {
        Self {
            slot: Rc::clone(slot),
            placeholder: Rc::clone(placeholder),
        }
    }

    /// Whether the entry behind this reference has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Whether both references read the same slot.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.slot, &other.slot)
    }
}

impl<T> Deref for AssetRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.slot.get().unwrap_or(&self.placeholder)
    }
}

impl<T> Clone for AssetRef<T> {
    fn clone(&self) -> Self {
        Self::new(&self.slot, &self.placeholder)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for AssetRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetRef")
            .field("loaded", &self.is_loaded())
            .field("asset", &**self)
            .finish()
    }
}

/// One cached asset and its bookkeeping.
#[derive(Debug)]
pub struct CacheEntry<T> {
    slot: Rc<OnceCell<T>>,
    ref_count: u32,
    filename: String,
    load_style: LoadStyle,
    load_time: LoadTime,
    drop_time: DropTime,
}

impl<T> CacheEntry<T> {
    fn new(id: &str, load_time: LoadTime, load_style: LoadStyle, drop_time: DropTime) -> Self {
        Self {
            slot: Rc::new(OnceCell::new()),
            ref_count: 0,
            filename: id.to_string(),
            load_style,
            load_time,
            drop_time,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn ref_count(&self) -> u32 {
        self.ref_count
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn load_style(&self) -> LoadStyle {
        self.load_style
    }

    pub fn load_time(&self) -> LoadTime {
        self.load_time
    }

    pub fn drop_time(&self) -> DropTime {
        self.drop_time
    }
}

/// Cache for one asset type.
///
/// Entries are created by [`get_reference`](Self::get_reference) with a
/// count of one, filled by [`load_asset`](Self::load_asset), and removed
/// when [`drop_reference`](Self::drop_reference) brings the count back to
/// zero, unless the entry's drop time is [`DropTime::AtExit`]. Those stay
/// until the handler itself is dropped.
///
/// Payloads are shared through [`AssetRef`]s. An entry that is not loaded
/// reads as the payload type's default value.
///
/// Handles dropped while the handler is borrowed queue their id instead of
/// losing the reference. The queue is drained by
/// [`release_pending`](Self::release_pending), which every mutating
/// reference operation calls first.
pub struct AssetHandler<T: Asset> {
    entries: HashMap<String, CacheEntry<T>>,
    placeholder: Rc<T>,
    pending: Rc<RefCell<Vec<String>>>,
    loader: Box<dyn AssetLoader<Asset = T>>,
    files: FileReader,
    memory: MemoryReader,
    config: AssetConfig,
}

impl<T: Asset> AssetHandler<T> {
    pub fn new(loader: impl AssetLoader<Asset = T>) -> Self {
        Self::with_config(loader, AssetConfig::default())
    }

    pub fn with_config(loader: impl AssetLoader<Asset = T>, config: AssetConfig) -> Self {
        Self {
            entries: HashMap::new(),
            placeholder: Rc::new(T::default()),
            pending: Rc::default(),
            loader: Box::new(loader),
            files: FileReader::new(&config.base_path),
            memory: MemoryReader::new(),
            config,
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Take one reference to `id`, creating its entry if needed.
    ///
    /// The policies only apply to a new entry; an existing entry keeps the
    /// ones it was created with. `LoadTime::Now` loads the entry right away
    /// either way.
    pub fn get_reference(
        &mut self,
        id: &str,
        load_time: LoadTime,
        load_style: LoadStyle,
        drop_time: DropTime,
    ) -> AssetRef<T> {
        self.release_pending();
        let entry = self.entries.entry(id.to_string()).or_insert_with(|| {
            tracing::trace!("AssetHandler<{}>: new entry '{}'", T::type_name(), id);
            CacheEntry::new(id, load_time, load_style, drop_time)
        });
        entry.ref_count = entry.ref_count.saturating_add(1);

        if load_time == LoadTime::Now {
            self.load_asset(id);
        }
        self.asset(id)
    }

    /// The shared placeholder payload, not backed by any entry.
    pub fn get_placeholder(&self) -> AssetRef<T> {
        AssetRef::new(&Rc::new(OnceCell::new()), &self.placeholder)
    }

    /// Give back one reference to `id`. Returns `true` if this removed the
    /// entry.
    pub fn drop_reference(&mut self, id: &str) -> bool {
        self.release_pending();
        self.release_reference(id)
    }

    /// Give back the references queued by handles that were dropped while
    /// the handler was borrowed. Returns how many were given back.
    pub fn release_pending(&mut self) -> usize {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        for id in &pending {
            self.release_reference(id);
        }
        pending.len()
    }

    pub(crate) fn pending_releases(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.pending)
    }

    fn release_reference(&mut self, id: &str) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            tracing::warn!(
                "AssetHandler<{}>::drop_reference({}): unknown id",
                T::type_name(),
                id
            );
            return false;
        };
        if entry.ref_count == 0 {
            tracing::warn!(
                "AssetHandler<{}>::drop_reference({}): reference count is already zero",
                T::type_name(),
                id
            );
            return false;
        }

        entry.ref_count -= 1;
        if entry.ref_count > 0 || !entry.drop_time.drops_at_zero() {
            return false;
        }
        self.remove(id);
        true
    }

    /// Load `id` through the strategy named by its load style.
    ///
    /// Returns `true` if the entry is loaded afterwards. An entry that is
    /// already loaded is not loaded again. Failures are logged and leave the
    /// entry unloaded; nothing retries them.
    pub fn load_asset(&mut self, id: &str) -> bool {
        self.release_pending();
        let Some(entry) = self.entries.get(id) else {
            tracing::warn!("AssetHandler<{}>::load_asset({}): unknown id", T::type_name(), id);
            return false;
        };
        if entry.is_loaded() {
            return true;
        }

        let ctx = LoadContext::new(
            id,
            &entry.filename,
            entry.load_style,
            &self.files,
            &self.memory,
        );
        let result = match entry.load_style {
            LoadStyle::FromFile if entry.filename.is_empty() => Err(AssetError::MissingFilename {
                id: id.to_string(),
            }),
            LoadStyle::FromFile => self.loader.load_from_file(&ctx),
            LoadStyle::FromMemory => self.loader.load_from_memory(&ctx),
            LoadStyle::FromNetwork => self.loader.load_from_network(&ctx),
            LoadStyle::FromUnknown => Err(AssetError::UnsupportedLoadStyle {
                id: id.to_string(),
                style: LoadStyle::FromUnknown,
            }),
        };

        match result {
            Ok(asset) => {
                // Empty here, the early return above covers loaded entries.
                let _ = entry.slot.set(asset);
                tracing::debug!("AssetHandler<{}>: loaded '{}'", T::type_name(), id);
                true
            }
            Err(err @ AssetError::MissingFilename { .. }) => {
                tracing::error!("AssetHandler<{}>::load_asset({}): {}", T::type_name(), id, err);
                false
            }
            Err(err) => {
                tracing::warn!("AssetHandler<{}>::load_asset({}): {}", T::type_name(), id, err);
                false
            }
        }
    }

    /// The payload of `id`, loading it first if needed.
    pub fn get_asset(&mut self, id: &str) -> AssetRef<T> {
        if !self.is_loaded(id) {
            self.load_asset(id);
        }
        self.asset(id)
    }

    /// The payload of `id` without loading it. Unknown ids give the
    /// placeholder.
    pub fn asset(&self, id: &str) -> AssetRef<T> {
        match self.entries.get(id) {
            Some(entry) => AssetRef::new(&entry.slot, &self.placeholder),
            None => self.get_placeholder(),
        }
    }

    /// The payload of `id` if it is loaded.
    pub fn get(&self, id: &str) -> Option<AssetRef<T>> {
        self.entries
            .get(id)
            .filter(|entry| entry.is_loaded())
            .map(|entry| AssetRef::new(&entry.slot, &self.placeholder))
    }

    pub fn entry(&self, id: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(id)
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(CacheEntry::is_loaded)
    }

    pub fn ref_count(&self, id: &str) -> u32 {
        self.entries.get(id).map_or(0, |entry| entry.ref_count)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The filename of `id`, or `""` for an unknown id.
    pub fn filename(&self, id: &str) -> &str {
        self.entries.get(id).map_or("", |entry| &entry.filename)
    }

    pub fn set_filename(&mut self, id: &str, filename: impl Into<String>) -> bool {
        match self.entry_mut("set_filename", id) {
            Some(entry) => {
                entry.filename = filename.into();
                true
            }
            None => false,
        }
    }

    /// The load style of `id`, or [`LoadStyle::FromUnknown`].
    pub fn load_style(&self, id: &str) -> LoadStyle {
        self.entries.get(id).map_or_else(LoadStyle::default, |entry| entry.load_style)
    }

    pub fn set_load_style(&mut self, id: &str, load_style: LoadStyle) -> bool {
        match self.entry_mut("set_load_style", id) {
            Some(entry) => {
                entry.load_style = load_style;
                true
            }
            None => false,
        }
    }

    /// The load time of `id`, or [`LoadTime::Later`].
    pub fn load_time(&self, id: &str) -> LoadTime {
        self.entries.get(id).map_or_else(LoadTime::default, |entry| entry.load_time)
    }

    pub fn set_load_time(&mut self, id: &str, load_time: LoadTime) -> bool {
        match self.entry_mut("set_load_time", id) {
            Some(entry) => {
                entry.load_time = load_time;
                true
            }
            None => false,
        }
    }

    /// The drop time of `id`, or [`DropTime::Unspecified`].
    pub fn drop_time(&self, id: &str) -> DropTime {
        self.entries.get(id).map_or_else(DropTime::default, |entry| entry.drop_time)
    }

    /// Change the drop time of `id`. An unreferenced entry that no longer
    /// waits for exit is removed immediately.
    pub fn set_drop_time(&mut self, id: &str, drop_time: DropTime) -> bool {
        let Some(entry) = self.entry_mut("set_drop_time", id) else {
            return false;
        };
        entry.drop_time = drop_time;
        if entry.ref_count == 0 && drop_time.drops_at_zero() {
            self.remove(id);
        }
        true
    }

    /// Stage bytes for [`LoadStyle::FromMemory`] loads of `id`. The block is
    /// discarded when the entry for `id` is removed.
    pub fn insert_memory(&mut self, id: impl Into<String>, bytes: Vec<u8>) {
        self.memory.insert(id, bytes);
    }

    pub fn memory(&self) -> &MemoryReader {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryReader {
        &mut self.memory
    }

    fn entry_mut(&mut self, operation: &str, id: &str) -> Option<&mut CacheEntry<T>> {
        let entry = self.entries.get_mut(id);
        if entry.is_none() {
            tracing::warn!("AssetHandler<{}>::{}({}): unknown id", T::type_name(), operation, id);
        }
        entry
    }

    fn remove(&mut self, id: &str) {
        if let Some(entry) = self.entries.remove(id) {
            if let Some(asset) = entry.slot.get() {
                self.loader.release(id, asset);
            }
            self.memory.remove(id);
            tracing::debug!("AssetHandler<{}>: removed '{}'", T::type_name(), id);
        }
    }
}

impl<T: Asset> std::fmt::Debug for AssetHandler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetHandler")
            .field("type", &T::type_name())
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Asset> Drop for AssetHandler<T> {
    fn drop(&mut self) {
        let mut released = 0;
        for (id, entry) in self.entries.drain() {
            if let Some(asset) = entry.slot.get() {
                self.loader.release(&id, asset);
                released += 1;
            }
        }
        if released > 0 {
            tracing::debug!(
                "AssetHandler<{}>: released {} assets at exit",
                T::type_name(),
                released
            );
        }
    }
}
