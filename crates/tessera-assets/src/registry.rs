//! Registry of per-type asset handlers.

use std::any::{Any, TypeId};
use std::cell::RefCell;

use tessera_core::alloc::HashMap;

use crate::Asset;
use crate::config::AssetConfig;
use crate::error::{AssetError, AssetResult};
use crate::handler::AssetHandler;
use crate::loader::AssetLoader;

/// Owns one [`AssetHandler`] per asset type.
///
/// Handlers are registered up front; handles then borrow the registry, so
/// it cannot change or go away while any handle is alive.
///
/// # Example
///
/// ```
/// use tessera_assets::{AssetError, AssetRegistry, BytesLoader};
///
/// let mut registry = AssetRegistry::new();
/// registry.register_loader(BytesLoader).unwrap();
///
/// assert!(registry.has_handler::<Vec<u8>>());
/// assert!(matches!(
///     registry.handler::<String>(),
///     Err(AssetError::NoHandler { .. })
/// ));
/// ```
#[derive(Default)]
pub struct AssetRegistry {
    /// Maps an asset TypeId to a boxed `RefCell<AssetHandler<T>>`.
    handlers: HashMap<TypeId, Box<dyn Any>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `T`. A type can only be registered once.
    pub fn register_handler<T: Asset>(&mut self, handler: AssetHandler<T>) -> AssetResult<()> {
        let type_id = TypeId::of::<T>();
        if self.handlers.contains_key(&type_id) {
            tracing::error!("AssetRegistry: handler for {} registered twice", T::type_name());
            return Err(AssetError::HandlerAlreadyRegistered {
                type_name: T::type_name(),
            });
        }

        self.handlers.insert(type_id, Box::new(RefCell::new(handler)));
        tracing::debug!("AssetRegistry: registered handler for {}", T::type_name());
        Ok(())
    }

    /// Register a handler with the default configuration around `loader`.
    pub fn register_loader<L: AssetLoader>(&mut self, loader: L) -> AssetResult<()> {
        self.register_handler(AssetHandler::new(loader))
    }

    pub fn register_loader_with_config<L: AssetLoader>(
        &mut self,
        loader: L,
        config: AssetConfig,
    ) -> AssetResult<()> {
        self.register_handler(AssetHandler::with_config(loader, config))
    }

    /// The handler for `T`, or [`AssetError::NoHandler`] if none was
    /// registered.
    pub fn handler<T: Asset>(&self) -> AssetResult<&RefCell<AssetHandler<T>>> {
        self.handlers
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<RefCell<AssetHandler<T>>>())
            .ok_or_else(|| {
                tracing::error!("AssetRegistry: no handler registered for {}", T::type_name());
                AssetError::NoHandler {
                    type_id: TypeId::of::<T>(),
                    type_name: T::type_name(),
                }
            })
    }

    pub fn has_handler<T: Asset>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
