use async_trait::async_trait;

use crate::errors::AppError;
use crate::generation::customizer::{customize_with_llm, Customization};
use crate::generation::jd_parser::{parse_company, parse_job};
use crate::llm_client::LlmClient;
use crate::models::{BaseRecord, CompanyInfo, JobInfo};

/// The AI collaborator seen by the pipeline.
///
/// The pipeline only ever holds a `&dyn ContentAssistant`, so tests drive it
/// with a fake and the LLM-backed implementation stays swappable.
#[async_trait]
pub trait ContentAssistant: Send + Sync {
    /// Free-text job description → structured record. Fails with `AiParsing`.
    async fn parse_job(&self, text: &str) -> Result<JobInfo, AppError>;

    /// Free-text company blurb → structured record. Fails with `AiParsing`.
    async fn parse_company(&self, text: &str) -> Result<CompanyInfo, AppError>;

    /// Tailored resume data plus cover letter body. Fails with `AiCustomization`.
    async fn customize(
        &self,
        base: &BaseRecord,
        job: &JobInfo,
        company: &CompanyInfo,
    ) -> Result<Customization, AppError>;
}

/// `ContentAssistant` backed by the chat-completion API.
pub struct LlmAssistant {
    llm: LlmClient,
}

impl LlmAssistant {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentAssistant for LlmAssistant {
    async fn parse_job(&self, text: &str) -> Result<JobInfo, AppError> {
        parse_job(text, &self.llm).await
    }

    async fn parse_company(&self, text: &str) -> Result<CompanyInfo, AppError> {
        parse_company(text, &self.llm).await
    }

    async fn customize(
        &self,
        base: &BaseRecord,
        job: &JobInfo,
        company: &CompanyInfo,
    ) -> Result<Customization, AppError> {
        customize_with_llm(&self.llm, base, job, company).await
    }
}
