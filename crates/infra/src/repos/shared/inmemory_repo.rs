use reminder_scheduler_domain::{Entity, ID};
use std::sync::{Mutex, MutexGuard};

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> anyhow::Result<MutexGuard<'_, Vec<T>>> {
    collection
        .lock()
        .map_err(|_| anyhow::anyhow!("Inmemory collection lock was poisoned"))
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) -> anyhow::Result<()> {
    lock(collection)?.push(val.clone());
    Ok(())
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> anyhow::Result<Option<T>> {
    let collection = lock(collection)?;
    Ok(collection.iter().find(|item| item.id() == val_id).cloned())
}

/// Returns the matching items in insertion order
pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> anyhow::Result<Vec<T>> {
    let collection = lock(collection)?;
    Ok(collection.iter().filter(|item| compare(item)).cloned().collect())
}

pub fn update_many<T, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> anyhow::Result<()> {
    let mut collection = lock(collection)?;
    for item in collection.iter_mut().filter(|item| compare(item)) {
        update(item);
    }
    Ok(())
}
