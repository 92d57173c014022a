//! In-memory registry of units and their liveness.
//!
//! Every unit that registers is remembered until the process exits. A unit is
//! online while fewer than `ttl` have elapsed since its latest registration
//! and offline afterwards; offline units stay listed but cannot be looked up.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use serde::Serialize;
use tracing::warn;

const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Longest unit name, in bytes, the registry accepts.
pub const MAX_UNIT_NAME_BYTES: usize = 127;

#[derive(Debug, Clone)]
struct UnitRecord {
    address: String,
    port: u16,
    last_seen: SystemTime,
}

impl UnitRecord {
    fn is_online(&self, now: SystemTime, ttl: Duration) -> bool {
        match self.last_seen.checked_add(ttl) {
            Some(deadline) => now < deadline,
            None => true,
        }
    }
}

/// Outcome of [`UnitRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The unit was not known before.
    Inserted,
    /// An existing record was overwritten.
    Updated,
}

/// Liveness of a unit at the time of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    /// Registered within the liveness window.
    Online,
    /// Not registered within the liveness window.
    Offline,
}

/// Entry returned by [`UnitRegistry::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    /// Unit name.
    pub name: String,
    /// Liveness computed against the query time.
    pub status: Liveness,
}

/// Network location of an online unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitAddress {
    /// Address the unit registered from.
    pub address: String,
    /// Port the unit listens on.
    pub port: u16,
}

/// Shared handle to the unit table.
///
/// Clones share the same underlying table.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: Arc<Mutex<HashMap<String, UnitRecord>>>,
    ttl: Duration,
}

impl UnitRegistry {
    /// Creates an empty registry whose units stay online for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            units: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Liveness window applied to every unit.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Records that `name` is reachable at `address:port` as of `now`.
    ///
    /// The latest registration wins for the address and port, while the
    /// last-seen time never moves backwards.
    pub fn register(&self, name: &str, address: &str, port: u16, now: SystemTime) -> Registration {
        let mut units = self.lock();
        if let Some(record) = units.get_mut(name) {
            record.address = address.to_owned();
            record.port = port;
            record.last_seen = record.last_seen.max(now);
            return Registration::Updated;
        }
        units.insert(
            name.to_owned(),
            UnitRecord {
                address: address.to_owned(),
                port,
                last_seen: now,
            },
        );
        Registration::Inserted
    }

    /// Returns the location of `name` when it is known and online.
    #[must_use]
    pub fn lookup(&self, name: &str, now: SystemTime) -> Option<UnitAddress> {
        let units = self.lock();
        units
            .get(name)
            .filter(|record| record.is_online(now, self.ttl))
            .map(|record| UnitAddress {
                address: record.address.clone(),
                port: record.port,
            })
    }

    /// Snapshots every known unit with its liveness at `now`.
    #[must_use]
    pub fn list(&self, now: SystemTime) -> Vec<UnitStatus> {
        let units = self.lock();
        units
            .iter()
            .map(|(name, record)| UnitStatus {
                name: name.clone(),
                status: if record.is_online(now, self.ttl) {
                    Liveness::Online
                } else {
                    Liveness::Offline
                },
            })
            .collect()
    }

    /// Number of known units, online or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when no unit has ever registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UnitRecord>> {
        // Each critical section leaves the map consistent, so a poisoned lock
        // still guards valid data.
        self.units.lock().unwrap_or_else(|poisoned| {
            warn!(
                target: REGISTRY_TARGET,
                "registry lock poisoned by a panicking worker; recovering"
            );
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::UNIX_EPOCH;

    use rstest::{fixture, rstest};

    use super::*;

    const TTL: Duration = Duration::from_secs(90);

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[fixture]
    fn registry() -> UnitRegistry {
        UnitRegistry::new(TTL)
    }

    #[rstest]
    fn new_registry_is_empty(registry: UnitRegistry) {
        assert!(registry.is_empty());
        assert!(registry.list(at(0)).is_empty());
    }

    #[rstest]
    fn registered_unit_is_online_and_resolvable(registry: UnitRegistry) {
        let outcome = registry.register("A", "10.0.0.5", 9000, at(1_000));
        assert_eq!(outcome, Registration::Inserted);
        assert_eq!(
            registry.lookup("A", at(1_001)),
            Some(UnitAddress {
                address: "10.0.0.5".to_owned(),
                port: 9000,
            })
        );
        assert_eq!(
            registry.list(at(1_001)),
            vec![UnitStatus {
                name: "A".to_owned(),
                status: Liveness::Online,
            }]
        );
    }

    #[rstest]
    #[case::just_inside(89, Liveness::Online)]
    #[case::at_deadline(90, Liveness::Offline)]
    #[case::well_after(600, Liveness::Offline)]
    fn liveness_follows_ttl(
        registry: UnitRegistry,
        #[case] elapsed: u64,
        #[case] expected: Liveness,
    ) {
        registry.register("A", "10.0.0.5", 9000, at(1_000));
        let listing = registry.list(at(1_000 + elapsed));
        assert_eq!(listing[0].status, expected);
        assert_eq!(
            registry.lookup("A", at(1_000 + elapsed)).is_some(),
            expected == Liveness::Online
        );
    }

    #[rstest]
    fn offline_units_stay_listed(registry: UnitRegistry) {
        registry.register("A", "10.0.0.5", 9000, at(0));
        assert!(registry.lookup("A", at(1_000)).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list(at(1_000))[0].status, Liveness::Offline);
    }

    #[rstest]
    fn re_registration_replaces_location(registry: UnitRegistry) {
        registry.register("A", "10.0.0.5", 9000, at(0));
        let outcome = registry.register("A", "10.0.0.6", 9100, at(10));
        assert_eq!(outcome, Registration::Updated);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup("A", at(11)),
            Some(UnitAddress {
                address: "10.0.0.6".to_owned(),
                port: 9100,
            })
        );
    }

    #[rstest]
    fn re_registration_revives_offline_unit(registry: UnitRegistry) {
        registry.register("A", "10.0.0.5", 9000, at(0));
        registry.register("A", "10.0.0.5", 9000, at(500));
        assert!(registry.lookup("A", at(550)).is_some());
    }

    #[rstest]
    fn last_seen_never_moves_backwards(registry: UnitRegistry) {
        registry.register("A", "10.0.0.5", 9000, at(100));
        registry.register("A", "10.0.0.7", 9001, at(50));
        let found = registry.lookup("A", at(185)).expect("still online");
        assert_eq!(found.address, "10.0.0.7");
    }

    #[rstest]
    fn unknown_unit_is_not_found(registry: UnitRegistry) {
        assert!(registry.lookup("ghost", at(0)).is_none());
    }

    #[test]
    fn listing_serialises_lowercase_status() {
        let status = UnitStatus {
            name: "A".to_owned(),
            status: Liveness::Offline,
        };
        let json = serde_json::to_string(&status).expect("serialise");
        assert_eq!(json, r#"{"name":"A","status":"offline"}"#);
    }

    #[rstest]
    fn concurrent_distinct_registrations_all_land(registry: UnitRegistry) {
        const WORKERS: usize = 32;
        let handles: Vec<_> = (0..WORKERS)
            .map(|index| {
                let registry = registry.clone();
                thread::spawn(move || {
                    registry.register(&format!("unit-{index}"), "10.0.0.1", 9000, at(0));
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }
        assert_eq!(registry.len(), WORKERS);
    }
}
