//! Per-song credit entries and per-person album aggregates

use serde::{Deserialize, Serialize};

use super::social::ProfileData;

/// Append each role not already present, preserving first-appearance order
pub fn merge_roles<'a>(target: &mut Vec<String>, roles: impl IntoIterator<Item = &'a String>) {
    for role in roles {
        if !target.contains(role) {
            target.push(role.clone());
        }
    }
}

/// A person credited on one song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditEntry {
    /// Display name; the identity key (exact, case-sensitive)
    pub name: String,
    /// Roles on this song, no duplicates
    pub roles: Vec<String>,
    pub genius_url: String,
    pub genius_id: Option<u64>,
}

impl CreditEntry {
    pub fn new(name: impl Into<String>, genius_url: impl Into<String>, genius_id: Option<u64>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
            genius_url: genius_url.into(),
            genius_id,
        }
    }

    /// Add a role unless it is empty or already present
    pub fn add_role(&mut self, role: &str) {
        if !role.is_empty() && !self.roles.iter().any(|r| r == role) {
            self.roles.push(role.to_string());
        }
    }
}

/// Roles a person held on one specific song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongCredit {
    pub title: String,
    pub roles: Vec<String>,
}

/// A person's credits across a whole album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCredit {
    pub name: String,
    /// Cumulative roles across every song, first-appearance order
    pub roles: Vec<String>,
    pub genius_url: String,
    pub genius_id: Option<u64>,
    pub songs: Vec<SongCredit>,
    pub instagram_handle: Option<String>,
    pub instagram_data: Option<ProfileData>,
}

impl PersonCredit {
    /// Start an aggregate from the first song entry that mentions this person
    pub fn from_entry(entry: &CreditEntry) -> Self {
        Self {
            name: entry.name.clone(),
            roles: Vec::new(),
            genius_url: entry.genius_url.clone(),
            genius_id: entry.genius_id,
            songs: Vec::new(),
            instagram_handle: None,
            instagram_data: None,
        }
    }

    /// Record this person's roles on one song
    pub fn add_song(&mut self, title: &str, entry: &CreditEntry) {
        self.songs.push(SongCredit {
            title: title.to_string(),
            roles: entry.roles.clone(),
        });
        merge_roles(&mut self.roles, &entry.roles);
    }
}
