// src/routes/chat.rs
use axum::{Json, extract::State};

use crate::{
    config::SYSTEM_PROMPT,
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::gemini::{FALLBACK_REPLY, GenerateRequest, extract_reply},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let user_message = payload.user_message.trim();

    if user_message.is_empty() {
        return Err(AppError::BadRequest("Missing userMessage".to_string()));
    }

    if !state.config.has_credential() {
        return Err(AppError::MissingApiKey);
    }

    let request = GenerateRequest::for_chat(SYSTEM_PROMPT, user_message);
    let response = state.model.generate(request).await?;

    let reply = extract_reply(&response).unwrap_or(FALLBACK_REPLY).to_string();

    Ok(Json(ChatResponse { reply }))
}

// Route-level fallback so non-POST verbs on /api/chat get a JSON body.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
