//! Prompt templates for the suggestion endpoints.

pub const SUMMARY_SYSTEM: &str = "You are an expert career coach and professional resume writer. \
You write compelling, achievement-focused resume copy. Return ONLY the requested text with no \
preamble, no markdown, and no surrounding quotes.";

pub const ENHANCE_SYSTEM: &str = "You are an expert resume writer. You rewrite job-description \
bullet points to be professional, action-oriented, and impactful, using strong action verbs. \
Return ONLY the improved text, one bullet per line, with no markdown formatting.";

/// Prompt for a 3-4 sentence professional summary.
pub fn summary_prompt(job_title: &str, skills: &[String], experience_years: &str) -> String {
    format!(
        "Write a compelling, professional resume summary (max 3-4 sentences) for a \"{job_title}\".\n\
         Key skills: {}.\n\
         Experience level: {experience_years}.\n\
         Focus on achievements, versatility, and professional value. Keep it punchy and avoid \
         overusing first-person pronouns.",
        skills.join(", ")
    )
}

/// Prompt for rewriting experience bullet points.
pub fn enhance_prompt(role: &str, raw_text: &str) -> String {
    format!(
        "Rewrite the following bullet point(s) for the role of \"{role}\" to be more professional, \
         action-oriented, and impactful.\n\nOriginal text:\n\"{raw_text}\"\n\n\
         If there are multiple points, keep one per line."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_includes_all_inputs() {
        let prompt = summary_prompt(
            "Backend Engineer",
            &["Rust".to_string(), "PostgreSQL".to_string()],
            "senior",
        );
        assert!(prompt.contains("Backend Engineer"));
        assert!(prompt.contains("Rust, PostgreSQL"));
        assert!(prompt.contains("senior"));
    }

    #[test]
    fn test_enhance_prompt_quotes_original_text() {
        let prompt = enhance_prompt("SRE", "did oncall");
        assert!(prompt.contains("\"SRE\""));
        assert!(prompt.contains("did oncall"));
    }
}
