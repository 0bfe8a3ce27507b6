//! Prompt construction for the summarizer relay.
//!
//! Both providers share one template set, parameterized by the article,
//! the length tier and the summary type.

use crate::settings::{SummaryLength, SummaryType};

/// System persona sent alongside every request
pub const SYSTEM_PROMPT: &str = "You are Summora, an AI assistant specialized in \
creating high-quality summaries and key takeaways from web articles.";

/// A provider-neutral prompt pair
#[derive(Debug, Clone)]
pub struct Prompt {
    /// System-role instruction (folded into the user message where the
    /// provider has no system role)
    pub system: String,
    /// User-role message carrying the instructions and article text
    pub user: String,
}

/// Word-count and bullet-count instruction for a length tier
pub fn length_instruction(length: SummaryLength) -> &'static str {
    match length {
        SummaryLength::Short => {
            "Provide a concise summary with 5-7 key takeaways (around 150 words total)."
        }
        SummaryLength::Medium => {
            "Provide a comprehensive summary with 8-10 key takeaways (around 250 words total)."
        }
        SummaryLength::Long => {
            "Provide a detailed summary with 12-15 key takeaways (around 400 words total)."
        }
    }
}

/// Build the prompt for an article
pub fn build_prompt(
    title: &str,
    content: &str,
    length: SummaryLength,
    summary_type: SummaryType,
) -> Prompt {
    let instruction = length_instruction(length);

    let user = match summary_type {
        SummaryType::Takeaways => format!(
            "Please extract the most important key takeaways from the following \
article titled \"{title}\".

{instruction}

Format your response as follows:
- Present ONLY a list of bullet points (\u{2022}) with the most important, actionable insights
- Each bullet point should be concise (1-2 sentences) but informative
- Focus on actionable insights, key statistics, main conclusions, and practical information
- Use bold text for any critical numbers, names, or terms within each bullet point
- Ensure each bullet point can stand alone as a valuable piece of information

Important formatting requirements:
- Use the bullet point symbol (\u{2022}) not dashes (-)
- Bold important terms using **term** format
- Do NOT include any title, introductory text or paragraphs, ONLY bullet points
- Do NOT use markdown headers (like # or ##), use bold text (**text**) instead

Focus on information that a busy professional would find most valuable: insights \
they can immediately understand and potentially act upon.

Here's the article content:

{content}"
        ),
        SummaryType::Full => format!(
            "Please summarize the following article titled \"{title}\".

{instruction}

Format the summary with:
- Do NOT include the article title at the beginning
- Use bold text for section titles (not markdown headers with #)
- Bullet points (\u{2022}) for key takeaways (not dashes)
- Well-structured paragraphs with appropriate spacing

Important:
- Do NOT use markdown headers (like # or ##) in your response. Instead, use bold \
text (**text**) for headings and section titles.
- Strictly adhere to the length requirements specified above. This is critical.
- Use the bullet point symbol (\u{2022}) not dashes (-)

Focus on the most important information, main arguments, key points, and conclusions. \
Maintain a neutral tone and ensure the summary is self-contained and understandable \
without the original article.

Here's the article content:

{content}"
        ),
    };

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
