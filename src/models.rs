use serde::{Deserialize, Serialize};

/// One hit returned by the web search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: None,
            score: None,
        }
    }
}

/// Which path a line of user input takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Exit,
    News(String),
    Chat(String),
}

/// The outcome of a single turn, rendered by the chat loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Goodbye,
    NoNews,
    NewsSummary(String),
    Answer(String),
}
