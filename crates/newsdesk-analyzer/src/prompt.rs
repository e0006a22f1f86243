//! LLM prompt construction for summarization and entity extraction

use crate::config::GenerationSettings;
use newsdesk_domain::{CompletionRequest, EntityCategory, NormalizedArticle};

/// System instruction for the summary call
pub const SUMMARY_SYSTEM: &str = "You are a professional news summarizer. \
Provide clear, concise, and accurate summaries of news articles.";

/// System instruction for the entity extraction call
pub const ENTITY_SYSTEM: &str = "You are an expert at identifying geopolitical entities \
in news text written in any language. Respond with a single valid JSON object and nothing else.";

const SUMMARY_INSTRUCTIONS: &str = r#"Please provide a concise and informative summary of the following news article.
The summary should:
- Be 2 to 3 sentences long
- Capture the main points and key information
- Be written in clear, professional language
- Stick to the facts stated in the article, without opinion or speculation"#;

const ENTITY_INSTRUCTIONS: &str = r#"Identify the geopolitical entities mentioned in the following news article.
The article may be written in more than one language.

Categories:
- countries: country names (e.g., "United States", "France", "Japan")
- nationalities: nationality adjectives and demonyms (e.g., "American", "French", "Japanese")
- people: full names of the people mentioned
- organizations: named organizations such as governments, ministries, companies, parties, alliances and sports governing bodies

Rules:
- Do not list events or competitions (e.g., "World Cup", "Olympic Games") as organizations, unless the name is also the name of the organizing body
- List each entity once
- Use the standard English name where one exists
- Use an empty array for a category with no entities"#;

/// Build the summary request for an article
pub fn summary_request(
    article: &NormalizedArticle,
    settings: &GenerationSettings,
) -> CompletionRequest {
    let mut prompt = String::new();

    prompt.push_str(SUMMARY_INSTRUCTIONS);
    prompt.push_str("\n\nArticle:\n---\n");
    prompt.push_str(article.as_str());
    prompt.push_str("\n---\n\nSummary:");

    CompletionRequest::new(SUMMARY_SYSTEM, prompt)
        .with_max_tokens(settings.max_tokens)
        .with_temperature(settings.temperature)
}

/// Build the entity extraction request for an article
pub fn entity_request(
    article: &NormalizedArticle,
    settings: &GenerationSettings,
) -> CompletionRequest {
    let mut prompt = String::new();

    prompt.push_str(ENTITY_INSTRUCTIONS);
    prompt.push_str("\n\nArticle:\n---\n");
    prompt.push_str(article.as_str());
    prompt.push_str("\n---\n\n");
    prompt.push_str(&output_format());

    CompletionRequest::new(ENTITY_SYSTEM, prompt)
        .with_max_tokens(settings.max_tokens)
        .with_temperature(settings.temperature)
        .with_json_output()
}

/// The exact JSON shape the extractor expects back
fn output_format() -> String {
    let keys: Vec<String> = EntityCategory::ALL
        .iter()
        .map(|category| format!("  \"{}\": [\"...\"]", category.key()))
        .collect();

    format!(
        "Output format (a JSON object with exactly these four keys, no additional text):\n{{\n{}\n}}\n\n\
         Remember: Return ONLY valid JSON, no markdown code blocks, no explanations.",
        keys.join(",\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_domain::normalize;

    fn settings() -> GenerationSettings {
        GenerationSettings {
            max_tokens: 123,
            temperature: 0.2,
        }
    }

    #[test]
    fn test_summary_prompt_includes_article() {
        let article = normalize("Leaders of France and Germany met in Paris.");
        let request = summary_request(&article, &settings());

        assert_eq!(request.system, SUMMARY_SYSTEM);
        assert!(request.prompt.contains("Leaders of France and Germany met in Paris."));
        assert!(request.prompt.contains("2 to 3 sentences"));
        assert!(!request.json_output);
    }

    #[test]
    fn test_summary_prompt_uses_settings() {
        let request = summary_request(&normalize("text"), &settings());
        assert_eq!(request.max_tokens, 123);
        assert_eq!(request.temperature, 0.2);
    }

    #[test]
    fn test_entity_prompt_lists_every_key() {
        let request = entity_request(&normalize("text"), &settings());

        for category in EntityCategory::ALL {
            assert!(
                request.prompt.contains(&format!("\"{}\"", category.key())),
                "missing key {}",
                category
            );
        }
    }

    #[test]
    fn test_entity_prompt_requests_json() {
        let request = entity_request(&normalize("Un article en français."), &settings());

        assert_eq!(request.system, ENTITY_SYSTEM);
        assert!(request.json_output);
        assert!(request.prompt.contains("Un article en français."));
        assert!(request.prompt.contains("more than one language"));
        assert!(request.prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn test_entity_prompt_excludes_events() {
        let request = entity_request(&normalize("text"), &settings());
        assert!(request.prompt.contains("Do not list events or competitions"));
    }

    #[test]
    fn test_system_instructions_differ() {
        // The mock provider routes on the system instruction
        assert_ne!(SUMMARY_SYSTEM, ENTITY_SYSTEM);
    }
}
