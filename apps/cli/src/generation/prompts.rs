// All LLM prompt constants for the generation stage.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for job description parsing.
pub const JOB_PARSE_SYSTEM: &str = "You are an expert at parsing job descriptions \
    and extracting structured information.";

/// Job parsing prompt template. Replace `{job_text}` before sending.
pub const JOB_PARSE_PROMPT_TEMPLATE: &str = r#"Parse this job description and extract structured information.

Return a JSON object with this EXACT schema:
{
  "title": "The job title",
  "description": "A concise summary of the role (2-3 sentences)",
  "requirements": ["Key requirement or qualification"],
  "key_responsibilities": ["Main responsibility"],
  "desired_skills": ["Important skill mentioned"],
  "company_name": "Company name if mentioned, otherwise null"
}

JOB DESCRIPTION:
{job_text}"#;

/// System prompt for company information parsing.
pub const COMPANY_PARSE_SYSTEM: &str = "You are an expert at parsing company information \
    and extracting structured details.";

/// Company parsing prompt template. Replace `{company_text}` before sending.
pub const COMPANY_PARSE_PROMPT_TEMPLATE: &str = r#"Parse this company information and extract structured details.

Return a JSON object with this EXACT schema:
{
  "name": "The ACTUAL company name mentioned in the text",
  "about": "Brief company description (2-3 sentences)",
  "industry": "Industry or sector",
  "size": "Company size if mentioned, otherwise null",
  "location": "Location or headquarters if mentioned, otherwise null",
  "website": "Website URL if mentioned, otherwise null",
  "values": ["Company value or culture point"],
  "recent_news": ["Recent achievement or news item"]
}

IMPORTANT: Extract the EXACT company name from the text (e.g. from "About [Company Name]"
or "[Company Name] is..."). Do NOT use generic terms like "Company" or "The Company".

COMPANY INFORMATION:
{company_text}"#;

/// System prompt for the resume rewrite call.
pub const RESUME_REWRITE_SYSTEM: &str = "You are a professional resume writer who tailors \
    existing resume content to a job description without inventing experience.";

/// Resume rewrite prompt.
/// Replace: {grounding_instruction}, {voice_instruction}, {candidate_json},
///          {experience_count}, {job_text}, {company_text}
pub const RESUME_REWRITE_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

{voice_instruction}

CANDIDATE DATA (source of truth: ONLY use facts from here):
{candidate_json}

TARGET JOB:
{job_text}

TARGET COMPANY:
{company_text}

Rewrite the professional summary and the bullets of each experience entry to better match
the terminology and priorities of the target job. You may reorder bullets within an entry
so the most relevant ones come first.

Return a JSON object:
{
  "summary": "Rewritten summary, 2-3 sentences",
  "experience": [
    {"responsibilities": ["Rewritten bullet", "Rewritten bullet"]}
  ]
}

HARD RULES:
1. `experience` MUST contain exactly {experience_count} entries, in the same order as the candidate data
2. Each entry keeps roughly the same number of bullets, of similar length
3. Never move a bullet from one entry to another
4. Never add skills, tools, numbers or outcomes that are not in the candidate data"#;

/// System prompt for the cover letter call.
pub const COVER_LETTER_SYSTEM: &str = "You are a professional writer who drafts concise, \
    authentic cover letters grounded strictly in the candidate's real experience.";

/// Cover letter prompt.
/// Replace: {grounding_instruction}, {voice_instruction}, {candidate_json},
///          {job_text}, {company_text}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

{voice_instruction}

CANDIDATE DATA (source of truth: ONLY use facts from here):
{candidate_json}

TARGET JOB:
{job_text}

TARGET COMPANY:
{company_text}

Write the body of a cover letter for this job: three or four short paragraphs that connect
the candidate's real experience to the role and say why this company appeals to them.

Return ONLY the body paragraphs as plain text separated by blank lines.
Do NOT include a date, address block, greeting ("Dear ...") or sign-off."#;
