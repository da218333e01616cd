//! A payload bundled with its own lock, dispensing RAII access tokens.
//!
//! Grounded on `original_source/DaemonRenderer/Source/Include/Threading/
//! Synchronized.hpp`: the C++ type pairs a `std::shared_mutex` with a value
//! and dispenses `SynchronizedAccess<T, EAccessMode>` tokens whose
//! destructors release the lock. `parking_lot::RwLock` gives the same
//! shared/exclusive semantics without poisoning on panic, which matters
//! here because a worker thread running a job under a write token must not
//! poison the lock for every other caller if that job panics (see
//! `scheduler`'s panic-catching contract).

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use parking_lot::RwLock;

/// Wraps a payload `T` behind a shared/exclusive lock and exposes three
/// token types: [`ReadToken`], [`WriteToken`] and [`UnsafeToken`].
///
/// `Synchronized` does not implement `Clone` or `Copy`; the borrow checker
/// already prevents it from being moved out from under a live token, since
/// every token borrows `&Synchronized<T>` for its own lifetime.
pub struct Synchronized<T> {
    lock: RwLock<T>,
}

impl<T> Synchronized<T> {
    /// Constructs the payload in place, forwarding to `T`'s constructor.
    /// No lock is taken.
    pub fn new(value: T) -> Self {
        Self { lock: RwLock::new(value) }
    }

    /// Takes a shared lock and returns a token exposing `&T`.
    ///
    /// Multiple read tokens may coexist.
    pub fn read(&self) -> ReadToken<'_, T> {
        ReadToken { guard: self.lock.read() }
    }

    /// Takes an exclusive lock and returns a token exposing `&mut T`.
    pub fn write(&self) -> WriteToken<'_, T> {
        WriteToken { guard: self.lock.write() }
    }

    /// Returns an unlocked reference to the payload.
    ///
    /// # Safety
    /// This is a deliberate escape hatch for single-threaded phases (e.g.
    /// during boot, before the scheduler starts, or during teardown after
    /// it has shut down). Calling this while another thread holds a read or
    /// write token, or while another thread concurrently calls `unsafe_ref`,
    /// is undefined behavior: the returned token performs no locking at all.
    pub unsafe fn unsafe_ref(&self) -> UnsafeToken<'_, T> {
        UnsafeToken {
            ptr: self.lock.data_ptr(),
            _marker: PhantomData,
        }
    }
}

/// A shared-lock RAII token. Releases the lock when dropped.
pub struct ReadToken<'a, T> {
    guard: parking_lot::RwLockReadGuard<'a, T>,
}

impl<T> Deref for ReadToken<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.guard
    }
}

/// An exclusive-lock RAII token. Releases the lock when dropped.
pub struct WriteToken<'a, T> {
    guard: parking_lot::RwLockWriteGuard<'a, T>,
}

impl<T> Deref for WriteToken<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for WriteToken<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

/// An unlocked escape-hatch token produced by [`Synchronized::unsafe_ref`].
///
/// Deliberately `!Send` and `!Sync` (via the raw-pointer field) so that a
/// token obtained on one thread cannot be smuggled to another: that would
/// defeat the "single-threaded phase" contract this type exists for.
pub struct UnsafeToken<'a, T> {
    ptr: *mut T,
    _marker: PhantomData<&'a mut T>,
}

impl<T> Deref for UnsafeToken<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        // SAFETY: contract is documented on `Synchronized::unsafe_ref`.
        unsafe { &*self.ptr }
    }
}

impl<T> DerefMut for UnsafeToken<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: contract is documented on `Synchronized::unsafe_ref`.
        unsafe { &mut *self.ptr }
    }
}
