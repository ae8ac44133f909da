use crate::models::SearchResult;

/// Renders search hits as `title: url` lines, one per hit.
pub fn format_news_sources(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| format!("{}: {}", result.title, result.url))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn generate_news_summary_prompt(results: &[SearchResult]) -> String {
    format!(
        r#"Here are some recent news articles:
{}

Please summarize the key points concisely in a human-readable format. Highlight important insights,
trends, or key takeaways. Format the output cleanly."#,
        format_news_sources(results)
    )
}
