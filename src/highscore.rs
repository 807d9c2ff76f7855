//! Best-score record
//!
//! One decimal string under one key. Anything missing or unparseable means
//! no best score yet.

use crate::store::KeyValueStore;

pub const STORAGE_KEY: &str = "flappyBirdHighScore";

pub struct HighScore {
    best: u32,
    store: Box<dyn KeyValueStore>,
}

impl HighScore {
    /// Read the stored best once.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let best = match store.get(STORAGE_KEY) {
            None => 0,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Stored best score {:?} is not a number, starting at 0", raw);
                0
            }),
        };
        log::info!("Best score: {}", best);
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a finished run. Only a strictly higher score replaces the best;
    /// returns whether it did. A failed write keeps the new best in memory.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.store.set(STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("New best score {} saved", score),
            Err(e) => log::warn!("New best score {} not saved: {}", score, e),
        }
        true
    }
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    fn store_with(value: &str) -> Box<dyn KeyValueStore> {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, value).unwrap();
        Box::new(store)
    }

    #[test]
    fn absent_is_zero() {
        assert_eq!(HighScore::load(Box::new(MemoryStore::new())).best(), 0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(HighScore::load(store_with("lots")).best(), 0);
        assert_eq!(HighScore::load(store_with("-3")).best(), 0);
    }

    #[test]
    fn parses_decimal() {
        assert_eq!(HighScore::load(store_with("42")).best(), 42);
    }

    #[test]
    fn only_strictly_higher_replaces() {
        let mut hs = HighScore::load(store_with("10"));
        assert!(!hs.submit(9));
        assert!(!hs.submit(10));
        assert_eq!(hs.best(), 10);
        assert!(hs.submit(11));
        assert_eq!(hs.best(), 11);
    }

    /// Shares its map with the test so writes can be inspected.
    struct Shared(std::rc::Rc<std::cell::RefCell<MemoryStore>>);

    impl KeyValueStore for Shared {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    #[test]
    fn persisted_value_roundtrips() {
        let inner = std::rc::Rc::new(std::cell::RefCell::new(MemoryStore::new()));
        let mut hs = HighScore::load(Box::new(Shared(inner.clone())));
        hs.submit(23);
        assert_eq!(inner.borrow().get(STORAGE_KEY).as_deref(), Some("23"));

        let reloaded = HighScore::load(Box::new(Shared(inner)));
        assert_eq!(reloaded.best(), 23);
    }

    struct Failing;

    impl KeyValueStore for Failing {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "/nowhere".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[test]
    fn failed_write_keeps_best_in_memory() {
        let mut hs = HighScore::load(Box::new(Failing));
        assert!(hs.submit(5));
        assert_eq!(hs.best(), 5);
    }
}
