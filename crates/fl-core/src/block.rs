//! The block contract and per-instance locking.
//!
//! Blocks and cascades are plain owners of their state: every mutating
//! operation takes `&mut self`, so exclusive access is enforced at compile
//! time. When an instance has to be observed from another thread (a telemetry
//! reader polling outputs while the control thread steps), it is wrapped in
//! [`Shared`], which puts exactly one mutex around that one instance.
//!
//! A cascade owns its sub-blocks by value, so stepping a shared cascade takes
//! a single lock and never acquires a sub-block lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A stateful unit exposing an output and a reset.
///
/// `step` is not part of the trait because its arity differs per block
/// (`Saturation::step(x)`, `Integrator::step(x, dt)`, ...).
pub trait Block {
    /// Snapshot type returned to observers.
    type Output: Copy;

    /// Last computed output.
    fn output(&self) -> Self::Output;

    /// Zero transient state. Configured bounds and gains persist.
    fn reset(&mut self);
}

/// A block guarded by its own mutual-exclusion lock.
///
/// The lock is held only for the duration of the closure passed to [`Shared::with`]
/// (or the state copy in [`Shared::output`]), so a concurrent reader sees either
/// the pre-step or the post-step value, never a torn one.
#[derive(Debug, Default)]
pub struct Shared<B> {
    inner: Mutex<B>,
}

impl<B: Block> Shared<B> {
    pub fn new(block: B) -> Self {
        Self {
            inner: Mutex::new(block),
        }
    }

    /// Run `f` with exclusive access to the block.
    pub fn with<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Copy out the last output.
    pub fn output(&self) -> B::Output {
        self.lock().output()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Exclusive access without locking; available when the wrapper itself is
    /// uniquely borrowed.
    pub fn get_mut(&mut self) -> &mut B {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> B {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Every operation validates before it mutates, so a panicking holder never
    // leaves a half-applied step behind and poisoning can be ignored.
    fn lock(&self) -> MutexGuard<'_, B> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: Block> From<B> for Shared<B> {
    fn from(block: B) -> Self {
        Self::new(block)
    }
}
