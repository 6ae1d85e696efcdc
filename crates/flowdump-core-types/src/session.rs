//! Session identity
//!
//! A session is one flow dump job. Its name is the key of the request entry
//! and of the state record the producer maintains.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix shared by every generated session name
pub const SESSION_PREFIX: &str = "flow_dump_";

/// Unique name of a flow dump session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionName(String);

impl SessionName {
    /// Generate a fresh session name using UUIDv7
    pub fn generate() -> Self {
        Self(format!("{}{}", SESSION_PREFIX, Uuid::now_v7().simple()))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for SessionName {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for SessionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for SessionName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_session_name_generation() {
        let a = SessionName::generate();
        let b = SessionName::generate();

        assert_ne!(a, b);
        assert!(a.as_str().starts_with(SESSION_PREFIX));
        assert!(a.as_str().len() > SESSION_PREFIX.len());
    }

    #[test]
    fn test_session_names_unique_over_many_generations() {
        let names: HashSet<_> = (0..100).map(|_| SessionName::generate()).collect();
        assert_eq!(names.len(), 100);
    }

    #[test]
    fn test_session_name_has_no_key_separators() {
        let name = SessionName::generate();
        assert!(!name.as_str().contains('|'));
        assert!(!name.as_str().contains(':'));
    }

    #[test]
    fn test_display_matches_as_str() {
        let name = SessionName::generate();
        assert_eq!(format!("{}", name), name.as_str());
    }

    #[test]
    fn test_serialization() {
        let name = SessionName::from_string("flow_dump_abc".to_string());
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"flow_dump_abc\"");
        let back: SessionName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}
