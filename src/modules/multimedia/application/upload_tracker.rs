use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-flight upload markers keyed by the owning record's id. Each upload holds
/// a guard, so one upload finishing never clears another's marker.
#[derive(Clone, Default)]
pub struct UploadTracker {
    active: Arc<Mutex<HashMap<String, usize>>>,
}

pub struct UploadGuard {
    active: Arc<Mutex<HashMap<String, usize>>>,
    owner: String,
}

fn lock(map: &Mutex<HashMap<String, usize>>) -> MutexGuard<'_, HashMap<String, usize>> {
    // Counters stay usable even if a holder panicked.
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, owner: &str) -> UploadGuard {
        *lock(&self.active).entry(owner.to_string()).or_insert(0) += 1;

        UploadGuard {
            active: self.active.clone(),
            owner: owner.to_string(),
        }
    }

    pub fn is_uploading(&self, owner: &str) -> bool {
        lock(&self.active).contains_key(owner)
    }

    /// Owners with at least one upload in flight, sorted.
    pub fn active_owners(&self) -> Vec<String> {
        let mut owners: Vec<String> = lock(&self.active).keys().cloned().collect();
        owners.sort();
        owners
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        let mut active = lock(&self.active);
        if let Some(count) = active.get_mut(&self.owner) {
            *count -= 1;
            if *count == 0 {
                active.remove(&self.owner);
            }
        }
    }
}
