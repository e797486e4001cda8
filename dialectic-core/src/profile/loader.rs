//! Embedded profile registry
//!
//! Profiles shipped with the crate are parsed once on first access and
//! shared afterwards.

use super::{Profile, ProfileConfig};
use crate::error::ProfileError;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static EMBEDDED: OnceLock<HashMap<String, Arc<Profile>>> = OnceLock::new();

macro_rules! embed_profile {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded_profiles() -> HashMap<String, Arc<Profile>> {
    let mut map = HashMap::new();

    let embedded = [embed_profile!(
        "ru",
        "../../configs/languages/russian.toml"
    )];

    for (code, toml_content) in embedded {
        match load_embedded_profile(code, toml_content) {
            Ok(profile) => {
                let profile = Arc::new(profile);
                map.insert(profile.name().to_lowercase(), profile.clone());
                map.insert(code.to_string(), profile);
            }
            Err(e) => {
                log::warn!("Failed to load embedded profile '{code}': {e}");
            }
        }
    }

    map
}

fn load_embedded_profile(code: &str, toml_content: &str) -> Result<Profile, ProfileError> {
    let config: ProfileConfig = toml::from_str(toml_content).map_err(|e| {
        ProfileError::ConfigurationError(format!("Failed to parse {code} profile: {e}"))
    })?;

    if config.metadata.code != code {
        return Err(ProfileError::ConfigurationError(format!(
            "Profile code mismatch: expected {}, got {}",
            code, config.metadata.code
        )));
    }

    Profile::from_config(&config)
}

/// Get an embedded profile by code (`"ru"`) or lowercase name (`"russian"`)
pub fn get_profile(code: &str) -> Result<Arc<Profile>, ProfileError> {
    EMBEDDED
        .get_or_init(load_embedded_profiles)
        .get(code)
        .cloned()
        .ok_or_else(|| ProfileError::UnsupportedLanguage(code.to_string()))
}

/// Codes of all embedded profiles
pub fn list_available_profiles() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = EMBEDDED
        .get_or_init(load_embedded_profiles)
        .iter()
        .filter(|(key, profile)| key.as_str() == profile.code())
        .map(|(key, _)| key.as_str())
        .collect();
    codes.sort_unstable();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_profile_unsupported() {
        match get_profile("nonexistent") {
            Err(ProfileError::UnsupportedLanguage(code)) => assert_eq!(code, "nonexistent"),
            other => panic!("Expected UnsupportedLanguage error, got {other:?}"),
        }
    }

    #[test]
    fn test_get_profile_by_code_and_name() {
        let by_code = get_profile("ru").unwrap();
        let by_name = get_profile("russian").unwrap();
        assert!(Arc::ptr_eq(&by_code, &by_name));
    }

    #[test]
    fn test_list_available_profiles() {
        assert_eq!(list_available_profiles(), vec!["ru"]);
    }

    #[test]
    fn test_code_mismatch_rejected() {
        let content = include_str!("../../configs/languages/russian.toml");
        let err = load_embedded_profile("uk", content).unwrap_err();
        assert!(err.to_string().contains("code mismatch"));
    }
}
