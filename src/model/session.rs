//! Session store holding the current user snapshot

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::collection::User;

/// Shared handle to the signed-in user.
///
/// Snapshots are immutable; the only way to change the user is to [`replace`]
/// it as a whole. Cloning the store clones the handle, not the data.
///
/// [`replace`]: SessionStore::replace
#[derive(Clone, Default)]
pub struct SessionStore {
    user: Arc<RwLock<Option<Arc<User>>>>,
    revision: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(Arc::new(user)))),
            revision: Arc::new(AtomicU64::new(1)),
        }
    }

    pub async fn current(&self) -> Option<Arc<User>> {
        self.user.read().await.clone()
    }

    pub async fn replace(&self, user: User) {
        let mut slot = self.user.write().await;
        *slot = Some(Arc::new(user));
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// Derive the next snapshot from the current one under a single write
    /// lock, so concurrent updates of different slices never lose each other.
    /// Does nothing when no user is signed in.
    pub async fn update(&self, f: impl FnOnce(&User) -> User) -> Option<Arc<User>> {
        let mut slot = self.user.write().await;
        let next = Arc::new(f(slot.as_deref()?));
        *slot = Some(next.clone());
        self.revision.fetch_add(1, Ordering::SeqCst);
        Some(next)
    }

    pub async fn clear(&self) {
        let mut slot = self.user.write().await;
        *slot = None;
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Bumped on every replace, update or clear
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replace_swaps_whole_snapshot() {
        let store = SessionStore::new();
        assert!(store.current().await.is_none());
        assert_eq!(store.revision(), 0);

        store
            .replace(User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await;
        let first = store.current().await.unwrap();

        store
            .replace(User {
                id: "u1".to_string(),
                name: "Grace".to_string(),
                ..Default::default()
            })
            .await;

        // Readers holding the old snapshot still see it unchanged
        assert_eq!(first.name, "Ada");
        assert_eq!(store.current().await.unwrap().name, "Grace");
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test]
    async fn clones_share_state_and_clear_drops_user() {
        let store = SessionStore::with_user(User::default());
        let other = store.clone();
        assert!(other.is_authenticated().await);

        store.clear().await;
        assert!(!other.is_authenticated().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_updates_of_different_slices_both_land() {
        use std::time::Duration;
        use crate::model::{Playlist, Track};

        let store = SessionStore::with_user(User::default());

        let slow = store.clone();
        let playlists = tokio::spawn(async move {
            slow.update(|user| {
                std::thread::sleep(Duration::from_millis(200));
                user.with_playlists(vec![Playlist {
                    id: "p1".to_string(),
                    name: "Gym".to_string(),
                    description: String::new(),
                    tracks: vec![],
                }])
            })
            .await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        store
            .update(|user| {
                user.with_favorites(vec![Track {
                    id: "t1".to_string(),
                    name: "Song".to_string(),
                    artist: "Artist".to_string(),
                    album_image: String::new(),
                    preview_url: None,
                    release_date: None,
                }])
            })
            .await;
        playlists.await.unwrap();

        let user = store.current().await.unwrap();
        assert_eq!(user.favorites.len(), 1);
        assert_eq!(user.playlists.len(), 1);
        assert_eq!(store.revision(), 3);
    }

    #[tokio::test]
    async fn update_without_user_is_noop() {
        let store = SessionStore::new();
        assert!(store.update(|user| user.clone()).await.is_none());
        assert_eq!(store.revision(), 0);
    }
}
