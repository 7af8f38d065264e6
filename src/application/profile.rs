use std::sync::RwLock;

use rentbook_api_types::Profile;
use tracing::debug;

use crate::cache::lock::{self, Site};

const SOURCE: &str = "application::profile";

/// Holds the signed-in user's profile.
///
/// The slot latches: once a profile is stored, `set(None)` leaves it in
/// place. Only [`ProfileStore::clear`] (logout) empties it again.
#[derive(Debug, Default)]
pub struct ProfileStore {
    slot: RwLock<Option<Profile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Profile> {
        lock::read(&self.slot, Site::new(SOURCE, "get")).clone()
    }

    pub fn set(&self, profile: Option<Profile>) {
        let Some(profile) = profile else {
            debug!("ignoring empty profile assignment");
            return;
        };
        *lock::write(&self.slot, Site::new(SOURCE, "set")) = Some(profile);
    }

    pub fn clear(&self) {
        lock::write(&self.slot, Site::new(SOURCE, "clear")).take();
    }

    /// Gate for queries that must wait for sign-in.
    pub fn is_authenticated(&self) -> bool {
        lock::read(&self.slot, Site::new(SOURCE, "is_authenticated")).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            telegram_id: 42,
            first_name: "Ada".to_string(),
            last_name: None,
            username: Some("ada".to_string()),
            photo_url: None,
        }
    }

    #[test]
    fn starts_empty() {
        let store = ProfileStore::new();
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn none_after_some_is_ignored() {
        let store = ProfileStore::new();
        store.set(Some(profile("u1")));
        store.set(None);
        assert_eq!(store.get().map(|p| p.id), Some("u1".to_string()));
        assert!(store.is_authenticated());
    }

    #[test]
    fn later_profile_replaces_earlier_one() {
        let store = ProfileStore::new();
        store.set(Some(profile("u1")));
        store.set(Some(profile("u2")));
        assert_eq!(store.get().map(|p| p.id), Some("u2".to_string()));
    }

    #[test]
    fn clear_empties_the_slot() {
        let store = ProfileStore::new();
        store.set(Some(profile("u1")));
        store.clear();
        assert!(!store.is_authenticated());
    }
}
