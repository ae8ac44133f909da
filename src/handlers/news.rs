use tracing::info;

use crate::error::Result;
use crate::models::Reply;
use crate::utils::generate_news_summary_prompt;
use crate::AppState;

/// Searches for `query` and asks the model to summarize whatever comes back.
pub async fn news(state: &AppState, query: &str) -> Result<Reply> {
    let results = state.search.search(query).await?;
    if results.is_empty() {
        info!(query, "search returned no results");
        return Ok(Reply::NoNews);
    }

    let prompt = generate_news_summary_prompt(&results);
    let summary = state.chat_model.complete(&prompt).await?;
    Ok(Reply::NewsSummary(summary))
}
