use crate::error::Result;
use crate::models::Reply;
use crate::AppState;

pub async fn chat(state: &AppState, message: &str) -> Result<Reply> {
    let response = state.chat_model.complete(message).await?;
    Ok(Reply::Answer(response))
}
