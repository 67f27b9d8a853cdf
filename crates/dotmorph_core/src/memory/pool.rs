//! # Recycling Pool
//!
//! Growing slot arena with a free stack for objects that are retired and
//! reused instead of dropped.

/// A growing arena whose freed slots stay populated and are handed out again.
///
/// Unlike a classic pool, freeing a slot does not drop the value: retired
/// particles keep fading out while they sit on the free stack, and are
/// revived in place when reused.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It is owned by a single particle system.
///
/// # Example
///
/// ```rust
/// use dotmorph_core::RecyclingPool;
///
/// let mut pool: RecyclingPool<u32> = RecyclingPool::new();
///
/// let handle = pool.allocate(1);
/// pool.free(handle);
///
/// // Reuse - no new slot
/// assert_eq!(pool.reuse(), Some(handle));
/// assert_eq!(pool.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecyclingPool<T> {
    /// Every slot ever allocated.
    storage: Vec<T>,
    /// Freed handles, most recently freed last.
    free_list: Vec<PoolHandle>,
    /// Membership flags for `free_list`, indexed like `storage`.
    is_free: Vec<bool>,
}

/// Handle to a slot in a [`RecyclingPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle {
    /// Index into the pool.
    index: usize,
}

impl PoolHandle {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T> RecyclingPool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty pool with room for `capacity` slots before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            is_free: Vec::with_capacity(capacity),
        }
    }

    /// Number of slots ever allocated (in use plus free).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if no slot was ever allocated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Number of slots waiting on the free stack.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Number of slots currently handed out.
    #[inline]
    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.storage.len() - self.free_list.len()
    }

    /// Appends a new slot holding `value`.
    pub fn allocate(&mut self, value: T) -> PoolHandle {
        let index = self.storage.len();
        self.storage.push(value);
        self.is_free.push(false);
        PoolHandle { index }
    }

    /// Pushes a handle onto the free stack. The value stays in place.
    ///
    /// Returns `false` for unknown handles and handles that are already free.
    pub fn free(&mut self, handle: PoolHandle) -> bool {
        match self.is_free.get_mut(handle.index) {
            Some(flag) if !*flag => {
                *flag = true;
                self.free_list.push(handle);
                true
            }
            _ => false,
        }
    }

    /// Pops the most recently freed handle, if any.
    pub fn reuse(&mut self) -> Option<PoolHandle> {
        let handle = self.free_list.pop()?;
        self.is_free[handle.index] = false;
        Some(handle)
    }

    /// Returns true if the handle is on the free stack.
    #[must_use]
    pub fn is_free(&self, handle: PoolHandle) -> bool {
        self.is_free.get(handle.index).copied().unwrap_or(false)
    }

    /// Free handles in stack order (oldest first).
    #[must_use]
    pub fn free_handles(&self) -> &[PoolHandle] {
        &self.free_list
    }

    /// Gets a reference to a slot.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.storage.get(handle.index)
    }

    /// Gets a mutable reference to a slot.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.storage.get_mut(handle.index)
    }

    /// Iterates over every slot, free or not.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.storage
            .iter()
            .enumerate()
            .map(|(index, value)| (PoolHandle { index }, value))
    }

    /// Visits the free slots mutably, in stack order (oldest first).
    pub fn for_each_free_mut(&mut self, mut f: impl FnMut(PoolHandle, &mut T)) {
        for &handle in &self.free_list {
            f(handle, &mut self.storage[handle.index]);
        }
    }
}

impl<T> Default for RecyclingPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
