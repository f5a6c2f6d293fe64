//! The user's career record and its per-run customized copy.

use std::fmt;
use std::ops::Deref;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::scalar_text;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl PersonalInfo {
    /// Non-empty contact fields in display order.
    pub fn contact_items(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.linkedin,
            &self.github,
            &self.website,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,
    /// Ordered bullet strings. The only experience field customization may rewrite.
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

impl ExperienceEntry {
    /// "Jan 2020 – Present", "2019", or empty when no dates are known.
    pub fn date_range(&self) -> String {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) => format!("{start} \u{2013} {end}"),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub graduation_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

/// Skills keyed by category, e.g. `{"Technical": ["Rust", "SQL"]}`.
///
/// Serialized as a JSON object; category order is the document order, which
/// is also the order the resume prints them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillSet(pub Vec<SkillGroup>);

impl SkillSet {
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|g| g.items.is_empty())
    }

    pub fn groups(&self) -> impl Iterator<Item = &SkillGroup> {
        self.0.iter().filter(|g| !g.items.is_empty())
    }
}

impl Serialize for SkillSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(&group.category, &group.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SkillSetVisitor;

        impl<'de> Visitor<'de> for SkillSetVisitor {
            type Value = SkillSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping skill categories to lists of skills")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SkillSet, A::Error> {
                let mut groups = Vec::new();
                while let Some((category, items)) = access.next_entry::<String, Vec<String>>()? {
                    groups.push(SkillGroup { category, items });
                }
                Ok(SkillSet(groups))
            }
        }

        deserializer.deserialize_map(SkillSetVisitor)
    }
}

/// The user's canonical career record. Loaded once per run, never mutated.
///
/// Top-level keys this tool does not know about are kept in `extra`; the
/// rendered output never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default, skip_serializing_if = "SkillSet::is_empty")]
    pub skills: SkillSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<CertificationEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BaseData {
    /// Checks the fields serde cannot express as required.
    pub fn validate(&self) -> Result<(), String> {
        if self.personal_info.name.trim().is_empty() {
            return Err("personal_info.name must not be empty".to_string());
        }
        for (i, exp) in self.experience.iter().enumerate() {
            if exp.title.trim().is_empty() || exp.company.trim().is_empty() {
                return Err(format!("experience[{i}] needs both a title and a company"));
            }
        }
        Ok(())
    }

    /// Starter record written by `cv-creator init`.
    pub fn starter() -> Self {
        BaseData {
            personal_info: PersonalInfo {
                name: "Your Name".to_string(),
                title: Some("Your Professional Title".to_string()),
                email: Some("your.email@example.com".to_string()),
                phone: Some("+1-234-567-8900".to_string()),
                location: Some("City, Country".to_string()),
                linkedin: Some("linkedin.com/in/yourprofile".to_string()),
                github: Some("github.com/yourusername".to_string()),
                website: Some("yourwebsite.com".to_string()),
            },
            summary: "Professional summary or objective statement".to_string(),
            experience: vec![ExperienceEntry {
                title: "Job Title".to_string(),
                company: "Company Name".to_string(),
                location: Some("City, Country".to_string()),
                start_date: Some("Jan 2020".to_string()),
                end_date: Some("Present".to_string()),
                responsibilities: vec![
                    "Key achievement or responsibility 1".to_string(),
                    "Key achievement or responsibility 2".to_string(),
                    "Key achievement or responsibility 3".to_string(),
                ],
            }],
            education: vec![EducationEntry {
                degree: "Degree Name".to_string(),
                institution: "University Name".to_string(),
                location: Some("City, Country".to_string()),
                graduation_date: Some("Year".to_string()),
                gpa: Some("3.8/4.0".to_string()),
                honors: Some("Cum Laude".to_string()),
            }],
            skills: SkillSet(vec![
                SkillGroup {
                    category: "Technical".to_string(),
                    items: vec!["Skill 1".into(), "Skill 2".into(), "Skill 3".into()],
                },
                SkillGroup {
                    category: "Languages".to_string(),
                    items: vec!["English (Native)".into(), "Spanish (Fluent)".into()],
                },
                SkillGroup {
                    category: "Tools".to_string(),
                    items: vec!["Tool 1".into(), "Tool 2".into(), "Tool 3".into()],
                },
            ]),
            projects: vec![ProjectEntry {
                name: "Project Name".to_string(),
                description: "Brief project description".to_string(),
                technologies: vec!["Tech 1".into(), "Tech 2".into()],
                link: Some("github.com/project".to_string()),
            }],
            certifications: vec![CertificationEntry {
                name: "Certification Name".to_string(),
                issuer: Some("Issuing Organization".to_string()),
                date: Some("Year".to_string()),
            }],
            extra: Map::new(),
        }
    }
}

/// A base-data file as loaded: the typed record plus the JSON document it was
/// parsed from.
///
/// Serializes as the document, so archived snapshots keep nulls, empty lists
/// and key order exactly as the user wrote them.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRecord {
    pub data: BaseData,
    pub document: Value,
}

impl Deref for BaseRecord {
    type Target = BaseData;

    fn deref(&self) -> &BaseData {
        &self.data
    }
}

impl Serialize for BaseRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

#[cfg(test)]
impl From<BaseData> for BaseRecord {
    fn from(data: BaseData) -> Self {
        let document = serde_json::to_value(&data).unwrap();
        BaseRecord { data, document }
    }
}

/// A per-run copy of a [`BaseRecord`] whose summary and experience bullets may
/// have been rewritten for one job. Rewrites are applied to both the typed
/// record and the document, so an uncustomized run produces a
/// `customized_data.json` identical to the base snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomizedData(BaseRecord);

impl CustomizedData {
    /// The identity customization used when AI is disabled.
    pub fn unchanged(base: &BaseRecord) -> Self {
        CustomizedData(base.clone())
    }

    /// Copies `base` and replaces only the rewritable fields.
    ///
    /// `bullets` must hold one list per experience entry, in base order.
    pub fn with_rewrites(
        base: &BaseRecord,
        summary: String,
        bullets: Vec<Vec<String>>,
    ) -> Result<Self, String> {
        if bullets.len() != base.experience.len() {
            return Err(format!(
                "expected bullets for {} experience entries, got {}",
                base.experience.len(),
                bullets.len()
            ));
        }
        let BaseRecord {
            mut data,
            mut document,
        } = base.clone();
        if !summary.trim().is_empty() {
            data.summary = summary.trim().to_string();
            if let Some(fields) = document.as_object_mut() {
                fields.insert("summary".to_string(), Value::String(data.summary.clone()));
            }
        }
        for (i, (entry, rewritten)) in data.experience.iter_mut().zip(bullets).enumerate() {
            let rewritten: Vec<String> = rewritten
                .into_iter()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect();
            if rewritten.is_empty() && !entry.responsibilities.is_empty() {
                return Err(format!(
                    "experience[{i}] ({} at {}) came back with no bullets",
                    entry.title, entry.company
                ));
            }
            entry.responsibilities = rewritten;
        }
        if let Some(entries) = document.get_mut("experience").and_then(Value::as_array_mut) {
            for (raw, entry) in entries.iter_mut().zip(&data.experience) {
                if let Some(fields) = raw.as_object_mut() {
                    let bullets = entry
                        .responsibilities
                        .iter()
                        .cloned()
                        .map(Value::String)
                        .collect();
                    fields.insert("responsibilities".to_string(), Value::Array(bullets));
                }
            }
        }
        Ok(CustomizedData(BaseRecord { data, document }))
    }

    /// Wraps a previously archived `customized_data.json` for re-rendering.
    pub fn from_archived(record: BaseRecord) -> Self {
        CustomizedData(record)
    }
}

impl Deref for CustomizedData {
    type Target = BaseData;

    fn deref(&self) -> &BaseData {
        &self.0.data
    }
}
