use gloo::storage::{LocalStorage, Storage};
use trivia_core::{GameError, SnapshotStorage};

/// `SnapshotStorage` backed by the browser's `localStorage`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct BrowserStorage;

impl SnapshotStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Could not read {} from local storage: {:?}", key, err);
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> trivia_core::Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| GameError::Storage(format!("{:?}", err)))
    }

    fn remove(&mut self, key: &str) {
        LocalStorage::delete(key);
    }

    fn keys(&self) -> Vec<String> {
        let raw = LocalStorage::raw();
        let len = raw.length().unwrap_or(0);
        (0..len).filter_map(|i| raw.key(i).ok().flatten()).collect()
    }
}
