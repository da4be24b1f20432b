use thiserror::Error;

use crate::analysis::FilterSpec;
use crate::config::DEFAULT_PROFILE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("profile '{0}' already exists")]
    Exists(String),
    #[error("no profile named '{0}'")]
    NotFound(String),
}

// ---------------------------------------------------------------------------
// Profile – a named set of groups under comparison
// ---------------------------------------------------------------------------

/// Ordered groups of one profile. Group names are unique within a profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub name: String,
    groups: Vec<(String, FilterSpec)>,
}

impl Profile {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            groups: Vec::new(),
        }
    }

    pub fn groups(&self) -> &[(String, FilterSpec)] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Insert, or overwrite in place if the group name already exists.
    fn upsert(&mut self, group_name: &str, spec: FilterSpec) {
        match self.groups.iter_mut().find(|(name, _)| name == group_name) {
            Some((_, existing)) => *existing = spec,
            None => self.groups.push((group_name.to_string(), spec)),
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileStore – process-lifetime session state
// ---------------------------------------------------------------------------

/// In-memory profiles plus the active selection.
///
/// Always holds at least one profile, so `active()` never fails.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
    active: usize,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore {
    /// A store holding only the default profile, which is active.
    pub fn new() -> Self {
        Self {
            profiles: vec![Profile::new(DEFAULT_PROFILE)],
            active: 0,
        }
    }

    /// Create an empty profile and make it active.
    pub fn create(&mut self, name: &str) -> Result<(), ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.position(name).is_some() {
            return Err(ProfileError::Exists(name.to_string()));
        }
        self.profiles.push(Profile::new(name));
        self.active = self.profiles.len() - 1;
        log::info!("Created profile '{name}'");
        Ok(())
    }

    /// Make an existing profile active.
    pub fn select(&mut self, name: &str) -> Result<(), ProfileError> {
        self.active = self
            .position(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;
        Ok(())
    }

    /// Add a group to `profile`, replacing any group with the same name.
    ///
    /// Tags are not checked against the dataset vocabulary; unknown tags
    /// simply never match.
    pub fn add_group<I, J, S, T>(
        &mut self,
        profile: &str,
        group_name: &str,
        required: I,
        excluded: J,
    ) -> Result<(), ProfileError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let group_name = group_name.trim();
        if group_name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        let idx = self
            .position(profile)
            .ok_or_else(|| ProfileError::NotFound(profile.to_string()))?;
        self.profiles[idx].upsert(group_name, FilterSpec::new(required, excluded));
        log::debug!("Profile '{profile}': set group '{group_name}'");
        Ok(())
    }

    /// Remove every group of `profile`; the profile itself stays.
    pub fn clear(&mut self, profile: &str) -> Result<(), ProfileError> {
        let idx = self
            .position(profile)
            .ok_or_else(|| ProfileError::NotFound(profile.to_string()))?;
        self.profiles[idx].groups.clear();
        log::info!("Cleared profile '{profile}'");
        Ok(())
    }

    pub fn active(&self) -> &Profile {
        &self.profiles[self.active]
    }

    pub fn active_name(&self) -> &str {
        &self.active().name
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.position(name).map(|i| &self.profiles[i])
    }

    /// Profile names in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == name)
    }
}
