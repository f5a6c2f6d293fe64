use serde::{Deserialize, Serialize};

use super::{nullable_string, string_list};

/// Structured job posting. Produced by a JSON load or by text parsing,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(
        default,
        alias = "key_responsibilities",
        deserialize_with = "string_list"
    )]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub requirements: Vec<String>,
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub desired_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl JobInfo {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("job.title must not be empty".to_string());
        }
        Ok(())
    }

    /// Flattened description handed to the model: the summary followed by
    /// responsibilities and requirements.
    pub fn as_prompt_text(&self) -> String {
        let mut text = format!("{}\n\n{}", self.title, self.description.trim());
        if !self.responsibilities.is_empty() {
            text.push_str("\n\nResponsibilities:\n");
            text.push_str(&bullet_lines(&self.responsibilities));
        }
        if !self.requirements.is_empty() {
            text.push_str("\n\nRequirements:\n");
            text.push_str(&bullet_lines(&self.requirements));
        }
        if !self.desired_skills.is_empty() {
            text.push_str("\n\nDesired skills: ");
            text.push_str(&self.desired_skills.join(", "));
        }
        text
    }
}

/// Structured company profile. Same provenance rules as [`JobInfo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub about: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub values: Vec<String>,
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub recent_news: Vec<String>,
}

impl CompanyInfo {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("company.name must not be empty".to_string());
        }
        Ok(())
    }

    pub fn as_prompt_text(&self) -> String {
        let mut text = format!("{}\n\n{}", self.name, self.about.trim());
        if let Some(industry) = &self.industry {
            text.push_str(&format!("\n\nIndustry: {industry}"));
        }
        if !self.values.is_empty() {
            text.push_str("\n\nValues:\n");
            text.push_str(&bullet_lines(&self.values));
        }
        if !self.recent_news.is_empty() {
            text.push_str("\n\nRecent news:\n");
            text.push_str(&bullet_lines(&self.recent_news));
        }
        text
    }
}

fn bullet_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_accepts_model_field_names() {
        let json = r#"{
            "title": "Backend Engineer",
            "description": "Build APIs.",
            "key_responsibilities": ["Design services", "Own on-call"],
            "requirements": ["3+ years Rust"],
            "desired_skills": ["Kafka"],
            "company_name": null
        }"#;
        let job: JobInfo = serde_json::from_str(json).unwrap();
        assert_eq!(job.responsibilities.len(), 2);
        assert_eq!(job.desired_skills, vec!["Kafka"]);
        assert!(job.company_name.is_none());
    }

    #[test]
    fn test_job_without_title_fails() {
        let result: Result<JobInfo, _> = serde_json::from_str(r#"{"description": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_title_fails_validation() {
        let job: JobInfo = serde_json::from_str(r#"{"title": " "}"#).unwrap();
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_company_values_as_single_string() {
        let company: CompanyInfo =
            serde_json::from_str(r#"{"name": "Acme", "values": "Customer obsession"}"#).unwrap();
        assert_eq!(company.values, vec!["Customer obsession"]);
        assert!(company.validate().is_ok());
    }

    #[test]
    fn test_job_prompt_text_lists_requirements() {
        let job = JobInfo {
            title: "Data Engineer".to_string(),
            description: "Pipelines all day.".to_string(),
            responsibilities: vec![],
            requirements: vec!["SQL".to_string(), "Airflow".to_string()],
            desired_skills: vec![],
            company_name: None,
        };
        let text = job.as_prompt_text();
        assert!(text.starts_with("Data Engineer"));
        assert!(text.contains("Requirements:\n- SQL\n- Airflow"));
        assert!(!text.contains("Responsibilities"));
    }
}
