use std::collections::HashMap;

use super::ClinicalProfile;

/// Authored-profile lookup. Injected into the generator so tests can
/// substitute fixtures; absence of a profile is a valid, common state.
pub trait ProfileRegistry: Send + Sync {
    fn lookup(&self, patient_id: &str) -> Option<&ClinicalProfile>;
}

/// Read-only registry over a pre-loaded profile set.
#[derive(Debug, Default)]
pub struct StaticProfileRegistry {
    profiles: HashMap<String, ClinicalProfile>,
}

impl StaticProfileRegistry {
    pub fn new(profiles: Vec<ClinicalProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|p| (p.patient_id.clone(), p))
                .collect(),
        }
    }

    /// Registry with no profiles; every patient takes the heuristic path.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileRegistry for StaticProfileRegistry {
    fn lookup(&self, patient_id: &str) -> Option<&ClinicalProfile> {
        self.profiles.get(patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::library;

    #[test]
    fn lookup_finds_registered_profile() {
        let registry = StaticProfileRegistry::new(library::builtin_profiles());
        assert!(registry.lookup("p1").is_some());
        assert_eq!(registry.lookup("p1").unwrap().patient_id, "p1");
    }

    #[test]
    fn lookup_misses_unknown_id() {
        let registry = StaticProfileRegistry::new(library::builtin_profiles());
        assert!(registry.lookup("nope").is_none());
    }

    #[test]
    fn empty_registry_finds_nothing() {
        let registry = StaticProfileRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.lookup("p1").is_none());
    }
}
