//! Reference-counted asset handles.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Asset;
use crate::error::{AssetError, AssetResult};
use crate::handler::{AssetHandler, AssetRef};
use crate::registry::AssetRegistry;
use crate::state::{DropTime, LoadStyle, LoadTime};

/// A counted reference to one cached asset.
///
/// Creating a handle adds a reference to its entry, cloning adds another,
/// and dropping gives one back. A handle borrows the registry its handler
/// lives in, so the handler outlives every handle.
///
/// A placeholder handle has no id and no entry. It reads as the payload's
/// default value until [`set_id`](Self::set_id) points it at an asset.
///
/// A handle dropped while its handler is borrowed queues its reference,
/// and the handler gives it back on its next reference operation.
///
/// # Example
///
/// ```
/// use tessera_assets::{AssetHandle, AssetRegistry, BytesLoader, LoadStyle};
///
/// let mut registry = AssetRegistry::new();
/// registry.register_loader(BytesLoader).unwrap();
///
/// let mut blob = AssetHandle::<Vec<u8>>::placeholder(&registry).unwrap();
/// assert!(blob.get_asset().is_empty());
///
/// blob.set_id("blob").unwrap();
/// blob.set_load_style(LoadStyle::FromMemory);
/// blob.insert_memory(vec![1, 2, 3]);
/// assert_eq!(*blob.get_asset(), vec![1, 2, 3]);
/// ```
pub struct AssetHandle<'r, T: Asset> {
    handler: &'r RefCell<AssetHandler<T>>,
    pending: Rc<RefCell<Vec<String>>>,
    id: Option<String>,
}

impl<T: Asset> std::fmt::Debug for AssetHandle<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetHandle")
            .field("type", &T::type_name())
            .field("id", &self.id)
            .finish()
    }
}

impl<'r, T: Asset> AssetHandle<'r, T> {
    /// Reference `id` using the handler's configured policies.
    pub fn new(registry: &'r AssetRegistry, id: impl Into<String>) -> AssetResult<Self> {
        let handler = registry.handler::<T>()?;
        let (load_time, load_style, drop_time) = defaults(handler);
        Self::from_handler(handler, id, load_time, load_style, drop_time)
    }

    pub fn with_options(
        registry: &'r AssetRegistry,
        id: impl Into<String>,
        load_time: LoadTime,
        load_style: LoadStyle,
        drop_time: DropTime,
    ) -> AssetResult<Self> {
        let handler = registry.handler::<T>()?;
        Self::from_handler(handler, id, load_time, load_style, drop_time)
    }

    /// A handle with no id.
    pub fn placeholder(registry: &'r AssetRegistry) -> AssetResult<Self> {
        let handler = registry.handler::<T>()?;
        Ok(Self {
            handler,
            pending: handler.borrow().pending_releases(),
            id: None,
        })
    }

    /// Reference `id` directly through `handler`, without a registry.
    pub fn from_handler(
        handler: &'r RefCell<AssetHandler<T>>,
        id: impl Into<String>,
        load_time: LoadTime,
        load_style: LoadStyle,
        drop_time: DropTime,
    ) -> AssetResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(AssetError::MissingId);
        }
        let pending = {
            let mut handler = handler.borrow_mut();
            handler.get_reference(&id, load_time, load_style, drop_time);
            handler.pending_releases()
        };
        Ok(Self {
            handler,
            pending,
            id: Some(id),
        })
    }

    /// The asset id, or `None` for a placeholder.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }

    /// Point this handle at `id` using the handler's configured policies.
    pub fn set_id(&mut self, id: impl Into<String>) -> AssetResult<()> {
        let (load_time, load_style, drop_time) = defaults(self.handler);
        self.set_id_with(id, load_time, load_style, drop_time)
    }

    /// Point this handle at `id`.
    ///
    /// The new reference is taken before the old one is given back, so
    /// re-pointing a handle at its own id never drops the entry.
    pub fn set_id_with(
        &mut self,
        id: impl Into<String>,
        load_time: LoadTime,
        load_style: LoadStyle,
        drop_time: DropTime,
    ) -> AssetResult<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(AssetError::MissingId);
        }

        let mut handler = self.handler.borrow_mut();
        handler.get_reference(&id, load_time, load_style, drop_time);
        if let Some(previous) = self.id.replace(id) {
            handler.drop_reference(&previous);
        }
        Ok(())
    }

    /// The payload, loading it first if needed.
    ///
    /// If the load fails, or this is a placeholder, the payload type's
    /// default is returned. Use [`is_loaded`](Self::is_loaded) to tell the
    /// cases apart.
    pub fn get_asset(&self) -> AssetRef<T> {
        match &self.id {
            Some(id) => self.handler.borrow_mut().get_asset(id),
            None => {
                tracing::warn!(
                    "AssetHandle<{}>::get_asset: handle has no id, using placeholder",
                    T::type_name()
                );
                self.handler.borrow().get_placeholder()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.read(false, |handler, id| handler.is_loaded(id))
    }

    /// Try to load the asset now. Returns whether it is loaded.
    pub fn load(&self) -> bool {
        self.write("load", false, |handler, id| handler.load_asset(id))
    }

    pub fn ref_count(&self) -> u32 {
        self.read(0, |handler, id| handler.ref_count(id))
    }

    pub fn filename(&self) -> String {
        self.read(String::new(), |handler, id| handler.filename(id).to_string())
    }

    pub fn set_filename(&self, filename: impl Into<String>) -> bool {
        let filename = filename.into();
        self.write("set_filename", false, |handler, id| {
            handler.set_filename(id, filename)
        })
    }

    pub fn load_style(&self) -> LoadStyle {
        self.read(LoadStyle::default(), |handler, id| handler.load_style(id))
    }

    pub fn set_load_style(&self, load_style: LoadStyle) -> bool {
        self.write("set_load_style", false, |handler, id| {
            handler.set_load_style(id, load_style)
        })
    }

    pub fn load_time(&self) -> LoadTime {
        self.read(LoadTime::default(), |handler, id| handler.load_time(id))
    }

    pub fn set_load_time(&self, load_time: LoadTime) -> bool {
        self.write("set_load_time", false, |handler, id| {
            handler.set_load_time(id, load_time)
        })
    }

    pub fn drop_time(&self) -> DropTime {
        self.read(DropTime::default(), |handler, id| handler.drop_time(id))
    }

    pub fn set_drop_time(&self, drop_time: DropTime) -> bool {
        self.write("set_drop_time", false, |handler, id| {
            handler.set_drop_time(id, drop_time)
        })
    }

    /// Stage bytes for loading this asset [`LoadStyle::FromMemory`].
    pub fn insert_memory(&self, bytes: Vec<u8>) {
        self.write("insert_memory", (), |handler, id| {
            handler.insert_memory(id, bytes)
        })
    }

    fn read<R>(&self, default: R, f: impl FnOnce(&AssetHandler<T>, &str) -> R) -> R {
        match self.id.as_deref() {
            Some(id) => f(&*self.handler.borrow(), id),
            None => default,
        }
    }

    fn write<R>(
        &self,
        operation: &str,
        default: R,
        f: impl FnOnce(&mut AssetHandler<T>, &str) -> R,
    ) -> R {
        match self.id.as_deref() {
            Some(id) => f(&mut *self.handler.borrow_mut(), id),
            None => {
                tracing::warn!(
                    "AssetHandle<{}>::{}: handle has no id",
                    T::type_name(),
                    operation
                );
                default
            }
        }
    }
}

fn defaults<T: Asset>(handler: &RefCell<AssetHandler<T>>) -> (LoadTime, LoadStyle, DropTime) {
    let handler = handler.borrow();
    let config = handler.config();
    (config.load_time, config.load_style, config.drop_time)
}

impl<T: Asset> Clone for AssetHandle<'_, T> {
    fn clone(&self) -> Self {
        if let Some(id) = &self.id {
            let (_, load_style, drop_time) = defaults(self.handler);
            self.handler
                .borrow_mut()
                .get_reference(id, LoadTime::Later, load_style, drop_time);
        }
        Self {
            handler: self.handler,
            pending: Rc::clone(&self.pending),
            id: self.id.clone(),
        }
    }
}

impl<T: Asset> Drop for AssetHandle<'_, T> {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => {
                handler.drop_reference(&id);
            }
            Err(_) => {
                tracing::debug!(
                    "AssetHandle<{}>: handler is busy, queueing release of '{}'",
                    T::type_name(),
                    id
                );
                self.pending.borrow_mut().push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BytesLoader;

    fn registry() -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        registry.register_loader(BytesLoader).unwrap();
        registry
    }

    fn count(registry: &AssetRegistry, id: &str) -> u32 {
        registry.handler::<Vec<u8>>().unwrap().borrow().ref_count(id)
    }

    #[test]
    fn test_clone_and_drop_are_balanced() {
        let registry = registry();
        let handle = AssetHandle::<Vec<u8>>::new(&registry, "blob").unwrap();
        assert_eq!(handle.ref_count(), 1);

        let copies: Vec<_> = (0..4).map(|_| handle.clone()).collect();
        assert_eq!(count(&registry, "blob"), 5);

        drop(copies);
        assert_eq!(count(&registry, "blob"), 1);

        drop(handle);
        assert_eq!(count(&registry, "blob"), 0);
        assert!(!registry.handler::<Vec<u8>>().unwrap().borrow().contains("blob"));
    }

    #[test]
    fn test_set_id_moves_the_reference() {
        let registry = registry();
        let keep = AssetHandle::<Vec<u8>>::new(&registry, "a").unwrap();
        let mut handle = keep.clone();
        assert_eq!(count(&registry, "a"), 2);

        handle.set_id("b").unwrap();
        assert_eq!(handle.id(), Some("b"));
        assert_eq!(count(&registry, "a"), 1);
        assert_eq!(count(&registry, "b"), 1);
    }

    #[test]
    fn test_set_id_to_same_id_keeps_entry() {
        let registry = registry();
        let mut handle = AssetHandle::<Vec<u8>>::new(&registry, "a").unwrap();
        handle.set_filename("a.bin");

        handle.set_id("a").unwrap();
        assert_eq!(handle.ref_count(), 1);
        assert_eq!(handle.filename(), "a.bin");
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let registry = registry();
        assert!(matches!(
            AssetHandle::<Vec<u8>>::new(&registry, ""),
            Err(AssetError::MissingId)
        ));

        let mut handle = AssetHandle::<Vec<u8>>::placeholder(&registry).unwrap();
        assert!(matches!(handle.set_id(""), Err(AssetError::MissingId)));
        assert!(handle.is_placeholder());
    }

    #[test]
    fn test_placeholder_accessors_use_defaults() {
        let registry = registry();
        let handle = AssetHandle::<Vec<u8>>::placeholder(&registry).unwrap();
        let copy = handle.clone();

        assert!(!copy.is_loaded());
        assert!(!copy.load());
        assert_eq!(copy.ref_count(), 0);
        assert_eq!(copy.filename(), "");
        assert_eq!(copy.load_style(), LoadStyle::FromUnknown);
        assert!(!copy.set_load_time(LoadTime::Now));
        assert!(copy.get_asset().is_empty());
        assert!(registry.handler::<Vec<u8>>().unwrap().borrow().is_empty());
    }

    #[test]
    fn test_drop_while_handler_borrowed_is_deferred() {
        let registry = registry();
        let handler = registry.handler::<Vec<u8>>().unwrap();
        let handle = AssetHandle::<Vec<u8>>::new(&registry, "blob").unwrap();

        let guard = handler.borrow();
        drop(handle);
        assert_eq!(guard.ref_count("blob"), 1);
        drop(guard);

        assert_eq!(handler.borrow_mut().release_pending(), 1);
        assert!(!handler.borrow().contains("blob"));
    }

    #[test]
    fn test_deferred_release_runs_on_next_reference() {
        let registry = registry();
        let handler = registry.handler::<Vec<u8>>().unwrap();
        let first = AssetHandle::<Vec<u8>>::new(&registry, "a").unwrap();
        {
            let _guard = handler.borrow_mut();
            drop(first);
        }

        let _second = AssetHandle::<Vec<u8>>::new(&registry, "b").unwrap();
        assert!(!handler.borrow().contains("a"));
        assert_eq!(count(&registry, "b"), 1);
    }

    #[test]
    fn test_asset_taken_before_load_sees_payload() {
        let registry = registry();
        let handle = AssetHandle::<Vec<u8>>::with_options(
            &registry,
            "blob",
            LoadTime::Later,
            LoadStyle::FromMemory,
            DropTime::AtZero,
        )
        .unwrap();
        handle.insert_memory(vec![4, 5]);

        let early = registry.handler::<Vec<u8>>().unwrap().borrow().asset("blob");
        assert!(early.is_empty());
        assert!(handle.load());
        assert_eq!(*early, vec![4, 5]);
    }

    #[test]
    fn test_clone_does_not_trigger_load() {
        let registry = registry();
        let handle = AssetHandle::<Vec<u8>>::with_options(
            &registry,
            "blob",
            LoadTime::Later,
            LoadStyle::FromMemory,
            DropTime::AtZero,
        )
        .unwrap();
        handle.insert_memory(vec![9]);

        let copy = handle.clone();
        assert!(!copy.is_loaded());
        assert_eq!(copy.load_style(), LoadStyle::FromMemory);
        assert!(copy.load());
        assert!(handle.is_loaded());
    }
}
