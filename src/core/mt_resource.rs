use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted container with read-write locking.
///
/// Every clone points at the same value. Readers share the lock; a writer holds it
/// alone, which serializes all mutation of the contained value.
///
/// # Examples
///
/// ```
/// # use std::thread;
/// use chunk_store::core::MtResource;
/// use chunk_store::voxels::chunk_manager::ChunkManager;
/// use chunk_store::voxels::position::ChunkPosition;
///
/// let manager = MtResource::new(ChunkManager::new());
/// let writer = manager.clone();
///
/// thread::spawn(move || {
///     writer.get_mut().get_or_create_chunk(ChunkPosition::new(0, 0, 0));
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(manager.get().chunk_count(), 1);
/// ```
///
/// # Poisoning
///
/// A thread that panics while holding the lock does not make the value unusable:
/// both guards recover a poisoned lock instead of panicking.
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a guard for reading the contained value.
    ///
    /// Blocks while a writer holds the lock.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a guard for modifying the contained value.
    ///
    /// Blocks until every other guard is released.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of handles pointing at the value, this one included.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
