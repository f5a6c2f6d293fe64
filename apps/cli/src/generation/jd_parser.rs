//! AI text parsing: extracts structured job and company records from free text.

use crate::errors::AppError;
use crate::generation::prompts::{
    COMPANY_PARSE_PROMPT_TEMPLATE, COMPANY_PARSE_SYSTEM, JOB_PARSE_PROMPT_TEMPLATE,
    JOB_PARSE_SYSTEM,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::{CompanyInfo, JobInfo};

/// Parses a job description using the LLM and returns a validated `JobInfo`.
pub async fn parse_job(job_text: &str, llm: &LlmClient) -> Result<JobInfo, AppError> {
    let prompt = JOB_PARSE_PROMPT_TEMPLATE.replace("{job_text}", job_text);
    let system = format!("{JOB_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");
    let job: JobInfo = llm
        .call_json(&prompt, &system, CallOptions::EXTRACT)
        .await
        .map_err(|e| AppError::AiParsing(format!("job description: {e}")))?;
    job.validate()
        .map_err(|reason| AppError::AiParsing(format!("job description: {reason}")))?;
    Ok(job)
}

/// Parses company information using the LLM and returns a validated `CompanyInfo`.
pub async fn parse_company(company_text: &str, llm: &LlmClient) -> Result<CompanyInfo, AppError> {
    let prompt = COMPANY_PARSE_PROMPT_TEMPLATE.replace("{company_text}", company_text);
    let system = format!("{COMPANY_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");
    let company: CompanyInfo = llm
        .call_json(&prompt, &system, CallOptions::EXTRACT)
        .await
        .map_err(|e| AppError::AiParsing(format!("company information: {e}")))?;
    company
        .validate()
        .map_err(|reason| AppError::AiParsing(format!("company information: {reason}")))?;
    Ok(company)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_reply;
    use crate::llm_client::test_server::{chat_body, serve_once};

    #[test]
    fn test_job_prompt_embeds_text() {
        let prompt = JOB_PARSE_PROMPT_TEMPLATE.replace("{job_text}", "Rust wizard wanted");
        assert!(prompt.contains("Rust wizard wanted"));
        assert!(!prompt.contains("{job_text}"));
    }

    #[test]
    fn test_company_prompt_embeds_text() {
        let prompt = COMPANY_PARSE_PROMPT_TEMPLATE.replace("{company_text}", "About Initech");
        assert!(prompt.contains("About Initech"));
        assert!(!prompt.contains("{company_text}"));
    }

    #[test]
    fn test_fenced_job_reply_deserializes() {
        let reply = "```json\n{\n  \"title\": \"Site Reliability Engineer\",\n  \"description\": \"Keep things up.\",\n  \"requirements\": [\"Linux\"],\n  \"key_responsibilities\": [\"Run incidents\"],\n  \"desired_skills\": [],\n  \"company_name\": \"Globex\"\n}\n```";
        let job: JobInfo = parse_json_reply(reply).unwrap();
        assert_eq!(job.title, "Site Reliability Engineer");
        assert_eq!(job.responsibilities, vec!["Run incidents"]);
        assert_eq!(job.company_name.as_deref(), Some("Globex"));
    }

    #[test]
    fn test_company_reply_with_nulls_deserializes() {
        let reply = r#"{
            "name": "Globex",
            "about": "Global exports.",
            "industry": "Logistics",
            "size": null,
            "location": null,
            "website": null,
            "values": ["Speed", "Candor"],
            "recent_news": "Opened a new port"
        }"#;
        let company: CompanyInfo = parse_json_reply(reply).unwrap();
        assert_eq!(company.values.len(), 2);
        assert_eq!(company.recent_news, vec!["Opened a new port"]);
        assert!(company.size.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_ai_parsing_error() {
        let settings = serve_once(500, r#"{"error": {"message": "overloaded"}}"#).await;
        let llm = LlmClient::new(settings).unwrap();

        let err = parse_job("Platform Engineer", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::AiParsing(_)), "got {err:?}");
        assert!(err.to_string().contains("overloaded"), "got {err}");
    }

    #[tokio::test]
    async fn test_prose_reply_is_ai_parsing_error() {
        let body = chat_body("Sure! The company is called Initech.");
        let settings = serve_once(200, &body).await;
        let llm = LlmClient::new(settings).unwrap();

        let err = parse_company("About Initech", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::AiParsing(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_reply_without_title_is_ai_parsing_error() {
        let body = chat_body(r#"{"title": "  ", "description": "Vague."}"#);
        let settings = serve_once(200, &body).await;
        let llm = LlmClient::new(settings).unwrap();

        let err = parse_job("???", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::AiParsing(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_valid_reply_is_parsed() {
        let body = chat_body(r#"{"title": "Platform Engineer", "requirements": ["Linux"]}"#);
        let settings = serve_once(200, &body).await;
        let llm = LlmClient::new(settings).unwrap();

        let job = parse_job("Platform Engineer wanted", &llm).await.unwrap();
        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(job.requirements, vec!["Linux"]);
    }
}
