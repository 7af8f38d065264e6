use std::sync::{
    LockResult, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use tracing::warn;

/// Where a guard was taken, for the poison-recovery warning.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site {
    pub target: &'static str,
    pub op: &'static str,
}

impl Site {
    pub(crate) const fn new(target: &'static str, op: &'static str) -> Self {
        Self { target, op }
    }
}

fn recover<G>(result: LockResult<G>, site: Site, lock_kind: &'static str) -> G {
    result.unwrap_or_else(|poisoned: PoisonError<G>| {
        warn!(
            op = site.op,
            target_module = site.target,
            lock_kind,
            result = "poisoned_recovered",
            hint = "cached state may be stale after a panic in another task",
            "Recovered from poisoned lock"
        );
        poisoned.into_inner()
    })
}

pub(crate) fn read<T>(lock: &RwLock<T>, site: Site) -> RwLockReadGuard<'_, T> {
    recover(lock.read(), site, "rwlock.read")
}

pub(crate) fn write<T>(lock: &RwLock<T>, site: Site) -> RwLockWriteGuard<'_, T> {
    recover(lock.write(), site, "rwlock.write")
}

pub(crate) fn lock<T>(mutex: &Mutex<T>, site: Site) -> MutexGuard<'_, T> {
    recover(mutex.lock(), site, "mutex.lock")
}
