// Skill extraction LLM prompt templates.

pub const SKILL_EXTRACTION_PROMPT: &str = "\
Extract all key technical skills and relevant soft skills from the following resume text.
Focus on specific, quantifiable skills. Provide the output as a JSON array of strings.

Resume Text:
{resume_text}
(Processing up to first {max_chars} characters to manage token limits for potentially large resumes)
";
