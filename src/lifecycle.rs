//! Host lifecycle scopes: back-press interception and restorable state.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A UI scope that may consume a back request.
pub trait BackHandler {
    /// Returns true when the request was consumed.
    fn try_handle(&mut self) -> bool;
}

/// Offer a back request to `scopes`, innermost first. Returns false when
/// every scope refused, in which case the caller falls back to exiting.
pub fn dispatch_back(scopes: &mut [&mut dyn BackHandler]) -> bool {
    for (depth, scope) in scopes.iter_mut().enumerate() {
        if scope.try_handle() {
            debug!(depth, "back press handled");
            return true;
        }
    }
    debug!("back press unhandled");
    false
}

/// Opaque keyed storage for state that should outlive the current screen.
pub trait StateStore {
    fn save(&mut self, key: &str, blob: Value);
    fn restore(&self, key: &str) -> Option<Value>;
}

pub type Bundle = Map<String, Value>;

/// In-memory `StateStore`, exported to and seeded from a `Bundle`.
#[derive(Debug, Clone, Default)]
pub struct TimeCapsule {
    entries: HashMap<String, Value>,
}

impl TimeCapsule {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bundle(saved: Option<Bundle>) -> Self {
        TimeCapsule {
            entries: saved.map(|b| b.into_iter().collect()).unwrap_or_default(),
        }
    }

    pub fn to_bundle(&self) -> Bundle {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn save_typed<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(blob) => self.save(key, blob),
            Err(e) => warn!(key, error = %e, "could not serialize state"),
        }
    }

    /// Restore and decode; a blob that no longer decodes is dropped.
    pub fn restore_typed<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let blob = self.restore(key)?;
        match serde_json::from_value(blob) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "discarding undecodable saved state");
                None
            }
        }
    }
}

impl StateStore for TimeCapsule {
    fn save(&mut self, key: &str, blob: Value) {
        debug!(key, "saving state");
        self.entries.insert(key.to_string(), blob);
    }

    fn restore(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    struct Scope {
        consumes: bool,
        asked: usize,
    }

    impl BackHandler for Scope {
        fn try_handle(&mut self) -> bool {
            self.asked += 1;
            self.consumes
        }
    }

    #[test]
    fn first_consuming_scope_stops_dispatch() {
        let mut inner = Scope { consumes: false, asked: 0 };
        let mut middle = Scope { consumes: true, asked: 0 };
        let mut outer = Scope { consumes: true, asked: 0 };

        assert!(dispatch_back(&mut [&mut inner, &mut middle, &mut outer]));
        assert_eq!((inner.asked, middle.asked, outer.asked), (1, 1, 0));
    }

    #[test]
    fn unhandled_when_every_scope_refuses() {
        let mut a = Scope { consumes: false, asked: 0 };
        let mut b = Scope { consumes: false, asked: 0 };
        assert!(!dispatch_back(&mut [&mut a, &mut b]));
        assert!(!dispatch_back(&mut []));
    }

    #[test]
    fn capsule_round_trips_through_a_bundle() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Nav {
            focus: usize,
        }

        let mut capsule = TimeCapsule::new();
        capsule.save_typed("home", &Nav { focus: 4 });
        capsule.save("raw", json!([1, 2]));

        let restored = TimeCapsule::from_bundle(Some(capsule.to_bundle()));
        assert_eq!(restored.restore_typed::<Nav>("home"), Some(Nav { focus: 4 }));
        assert_eq!(restored.restore("raw"), Some(json!([1, 2])));
        assert_eq!(restored.restore("missing"), None);
    }

    #[test]
    fn undecodable_state_is_dropped() {
        let mut capsule = TimeCapsule::new();
        capsule.save("home", json!("not a number"));
        assert_eq!(capsule.restore_typed::<usize>("home"), None);
    }
}
