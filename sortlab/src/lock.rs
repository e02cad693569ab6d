//! Lock poisoning recovery for the shared run array.
//!
//! A poisoned mutex means a thread panicked while holding it. The data the
//! scheduler guards is a plain integer array being redrawn by a UI, so
//! recovering the guard and continuing beats losing the run: the array is
//! valid as of the last fully-applied operation either way.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Acquires `mutex`, recovering the guard if the lock is poisoned.
pub(crate) fn recover_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    recover(mutex.lock())
}

/// Recovers a guard from a possibly-poisoned lock result.
pub(crate) fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    result.unwrap_or_else(|poison| {
        tracing::warn!("recovering from poisoned lock");
        poison.into_inner()
    })
}
