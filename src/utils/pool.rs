//! Pooled scratch buffers for allocation-free query traversals.

use alloc::vec::Vec;
use std::cell::RefCell;
use std::mem;
use std::ops::{Deref, DerefMut};

/// A pool of reusable `Vec<T>` scratch buffers.
///
/// Buffers are checked out with [`BufferPool::acquire`] and automatically
/// returned to the pool when the returned [`PooledVec`] guard is dropped,
/// including on early returns. The guard owns the buffer exclusively, so a
/// buffer can never be returned twice nor retained past its release.
///
/// A pool is intended to be owned by a single thread (typically through a
/// [`ScratchArena`]); concurrent queries on separate threads each use their
/// own arena.
pub struct BufferPool<T> {
    free: RefCell<Vec<Vec<T>>>,
}

impl<T> BufferPool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            free: RefCell::new(Vec::new()),
        }
    }

    /// Checks a buffer out of this pool.
    ///
    /// The buffer is empty but may retain capacity from previous checkouts.
    pub fn acquire(&self) -> PooledVec<'_, T> {
        let buf = self.free.borrow_mut().pop().unwrap_or_default();
        PooledVec { buf, pool: self }
    }

    /// The number of buffers currently resting in this pool.
    pub fn free_count(&self) -> usize {
        self.free.borrow().len()
    }

    fn release(&self, mut buf: Vec<T>) {
        buf.clear();
        self.free.borrow_mut().push(buf);
    }
}

impl<T> Default for BufferPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A scratch buffer checked out of a [`BufferPool`].
///
/// Dereferences to a `Vec<T>` and returns itself to the pool on drop.
pub struct PooledVec<'a, T> {
    buf: Vec<T>,
    pool: &'a BufferPool<T>,
}

impl<T> Deref for PooledVec<'_, T> {
    type Target = Vec<T>;

    #[inline]
    fn deref(&self) -> &Vec<T> {
        &self.buf
    }
}

impl<T> DerefMut for PooledVec<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }
}

impl<T> Drop for PooledVec<'_, T> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.buf));
    }
}

/// The scratch buffers needed by one thread's worth of tree traversals.
///
/// Queries borrow the arena immutably, so several queries may nest (a
/// traversal callback may itself start a traversal) without aliasing issues:
/// each one checks its own buffers out of the pools.
#[derive(Default)]
pub struct ScratchArena {
    /// Pool of node-index stacks.
    pub index_buffers: BufferPool<u32>,
    /// Pool of node-index-pair stacks.
    pub pair_buffers: BufferPool<(u32, u32)>,
}

impl ScratchArena {
    /// Creates an arena with empty pools.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::BufferPool;

    #[test]
    fn buffers_are_recycled() {
        let pool = BufferPool::<u32>::new();

        {
            let mut a = pool.acquire();
            a.extend_from_slice(&[1, 2, 3]);
            let cap = a.capacity();
            assert!(cap >= 3);
            assert_eq!(pool.free_count(), 0);
            drop(a);

            // The same allocation must come back, cleared.
            let b = pool.acquire();
            assert!(b.is_empty());
            assert_eq!(b.capacity(), cap);
        }

        assert_eq!(pool.free_count(), 1);
    }

    #[test]
    fn early_exit_releases() {
        fn traverse(pool: &BufferPool<u32>, bail: bool) -> Option<u32> {
            let mut stack = pool.acquire();
            stack.push(42);

            if bail {
                // The guard must release the buffer on this path too.
                return None;
            }

            stack.pop()
        }

        let pool = BufferPool::new();
        assert_eq!(traverse(&pool, true), None);
        assert_eq!(pool.free_count(), 1);
        assert_eq!(traverse(&pool, false), Some(42));
        assert_eq!(pool.free_count(), 1);
    }
}
