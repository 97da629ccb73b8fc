//! Prompt templates for the ALLAR persona

/// Fixed prompts used by the console
pub struct PromptTemplate;

impl PromptTemplate {
    /// System instruction fixing the assistant's persona and rules.
    pub fn persona_system() -> &'static str {
        r#"You are ALLAR AI, a professional AI assistant built for speed and clarity.
Your role is to help users make better business decisions and assist with fundraising efforts.

GUIDELINES:
- Give practical, actionable answers.
- Be concise, structured, and confident.
- Do not hallucinate or guess. If data is missing, say so clearly.
- Prefer bullet points and step-by-step instructions.
- Think and communicate like a high-level business consultant, not a chatbot.
- Tone: Premium, Calm, Direct, and User-Friendly."#
    }

    /// Starter prompts offered on an empty thread, as `(label, prompt)`.
    pub fn suggestions() -> &'static [(&'static str, &'static str)] {
        &[
            ("MARKET ALPHA", "Analyze competitor GTM strategy for 2025."),
            ("VENTURE BRIDGE", "Structure a Series A pitch deck framework."),
        ]
    }

    /// Look up a starter prompt by its 1-based position.
    pub fn suggestion(position: usize) -> Option<&'static str> {
        position
            .checked_sub(1)
            .and_then(|i| Self::suggestions().get(i))
            .map(|(_, prompt)| *prompt)
    }
}
