//! Form fields that arrive as `""` when the user leaves them empty.

use serde::{de, Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserialize an optional string field, treating `null` and blank text as
/// absent and parsing anything else with `FromStr`.
pub fn deserialize_blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "deserialize_blank_as_none")]
        email: Option<String>,
        #[serde(default, deserialize_with = "deserialize_blank_as_none")]
        lead_id: Option<Uuid>,
    }

    #[test]
    fn blank_and_missing_fields_are_none() {
        let form: Form = serde_json::from_str(r#"{"email": "", "lead_id": "  "}"#).unwrap();
        assert_eq!(form.email, None);
        assert_eq!(form.lead_id, None);

        let form: Form = serde_json::from_str(r#"{"lead_id": null}"#).unwrap();
        assert_eq!(form.email, None);
        assert_eq!(form.lead_id, None);
    }

    #[test]
    fn filled_fields_are_parsed() {
        let form: Form = serde_json::from_str(
            r#"{"email": "a@b.test", "lead_id": "3d6f1a2b-4c5d-4e6f-8a9b-0c1d2e3f4a5b"}"#,
        )
        .unwrap();
        assert_eq!(form.email.as_deref(), Some("a@b.test"));
        assert!(form.lead_id.is_some());
    }

    #[test]
    fn malformed_uuid_is_an_error() {
        assert!(serde_json::from_str::<Form>(r#"{"lead_id": "not-a-uuid"}"#).is_err());
    }
}
