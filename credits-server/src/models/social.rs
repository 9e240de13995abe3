//! Social profile lookup outcomes

use serde::{Deserialize, Serialize};

/// Public Instagram profile fields used for contact discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    /// Filled in by contact extraction, never by the profile client
    pub email: Option<String>,
    pub full_name: String,
    pub bio: String,
    pub followers: u64,
    pub external_url: String,
}

/// Outcome of a profile lookup
#[derive(Debug, Clone, PartialEq)]
pub enum SocialLookup {
    Found(SocialProfile),
    NotFound,
    /// The remote service demanded a logged-in session
    AuthRequired,
    TransportError(String),
}

/// JSON projection of a lookup stored in `instagram_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileData {
    Profile(SocialProfile),
    Error { error: String, email: Option<String> },
}

impl SocialLookup {
    /// Project to the serialized shape; not-found and transport failures
    /// become `None`
    pub fn into_profile_data(self) -> Option<ProfileData> {
        match self {
            SocialLookup::Found(profile) => Some(ProfileData::Profile(profile)),
            SocialLookup::AuthRequired => Some(ProfileData::Error {
                error: "Login required".to_string(),
                email: None,
            }),
            SocialLookup::NotFound | SocialLookup::TransportError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_required_serializes_as_error_marker() {
        let data = SocialLookup::AuthRequired.into_profile_data();
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"error": "Login required", "email": null})
        );
    }

    #[test]
    fn test_not_found_and_transport_error_are_null() {
        assert!(SocialLookup::NotFound.into_profile_data().is_none());
        assert!(SocialLookup::TransportError("timeout".into())
            .into_profile_data()
            .is_none());
    }
}
