pub mod base_data;
pub mod job;

pub use base_data::{BaseData, BaseRecord, CustomizedData, ExperienceEntry};
pub use job::{CompanyInfo, JobInfo};

use serde::{Deserialize, Deserializer};

/// Accepts `null`, a single string, or an array of strings.
///
/// Job and company documents come from users and from model output, and both
/// are loose about list fields: `"values": "Ownership"` and `"values": null`
/// are as common as a proper array.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(items)) => items,
    })
}

/// Treats an explicit `null` like a missing string.
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional text that hand-written files often give as a bare number
/// (`"graduation_date": 2020`, `"gpa": 3.8`). Numbers keep their JSON spelling.
pub(crate) fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "string_list")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "nullable_string")]
        text: String,
        #[serde(default, deserialize_with = "scalar_text")]
        year: Option<String>,
    }

    #[test]
    fn test_string_list_accepts_all_shapes() {
        let p: Fields = serde_json::from_str(r#"{"items": ["a", "b"]}"#).unwrap();
        assert_eq!(p.items, vec!["a", "b"]);

        let p: Fields = serde_json::from_str(r#"{"items": "solo"}"#).unwrap();
        assert_eq!(p.items, vec!["solo"]);

        let p: Fields = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(p.items.is_empty());

        let p: Fields = serde_json::from_str(r#"{}"#).unwrap();
        assert!(p.items.is_empty());
    }

    #[test]
    fn test_string_list_rejects_numbers() {
        let result: Result<Fields, _> = serde_json::from_str(r#"{"items": [1, 2]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_nullable_string() {
        let p: Fields = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert_eq!(p.text, "");
    }

    #[test]
    fn test_scalar_text_accepts_numbers() {
        let p: Fields = serde_json::from_str(r#"{"year": 2020}"#).unwrap();
        assert_eq!(p.year.as_deref(), Some("2020"));

        let p: Fields = serde_json::from_str(r#"{"year": 3.8}"#).unwrap();
        assert_eq!(p.year.as_deref(), Some("3.8"));

        let p: Fields = serde_json::from_str(r#"{"year": "Spring 2021"}"#).unwrap();
        assert_eq!(p.year.as_deref(), Some("Spring 2021"));

        let p: Fields = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert!(p.year.is_none());
    }

    #[test]
    fn test_scalar_text_rejects_lists() {
        let result: Result<Fields, _> = serde_json::from_str(r#"{"year": [2020]}"#);
        assert!(result.is_err());
    }
}
