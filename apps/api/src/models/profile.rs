use serde::{Deserialize, Serialize};

/// Structured career data supplied by the caller, consumed once per request.
///
/// Every field is optional on the wire: absent fields deserialize to empty
/// values and the prompt builder renders explicit placeholders for them.
/// Only `name` is required, and that is enforced by the HTTP handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub contacts: String,
    pub about: String,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub additional_info: String,
    pub target_position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_deserializes_with_defaults() {
        let json = serde_json::json!({
            "name": "Иван Иванов",
            "skills": ["Python", "Go"]
        });
        let profile: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.name, "Иван Иванов");
        assert_eq!(profile.skills, vec!["Python", "Go"]);
        assert!(profile.contacts.is_empty());
        assert!(profile.experience.is_empty());
        assert!(profile.target_position.is_none());
    }

    #[test]
    fn test_empty_object_deserializes() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(profile.name.is_empty());
        assert!(profile.achievements.is_empty());
    }
}
