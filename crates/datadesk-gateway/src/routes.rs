//! HTTP request handlers for the DataDesk API.

use axum::{Json, extract::State};
use std::sync::Arc;

use datadesk_core::types::{GenerateParams, MasterData, Message};
use datadesk_retrieval::{
    DEFAULT_MAX_CHUNK_CHARS, DEFAULT_MAX_RESULTS, LexicalIndex, build_context, search,
    segment_text,
};

use super::error::ApiError;
use super::server::AppState;

/// Service banner: who we are and what we are wired to.
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": state.config.identity.name,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "provider": state.provider.name(),
        "storage": state.store.describe(),
    }))
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Return the current master-data blob.
pub async fn get_master_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = state.store.load()?;
    Ok(Json(serde_json::json!(data)))
}

/// Replace the master-data blob and push the new revision to WS clients.
pub async fn update_master_data(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let content = body["content"].as_str().unwrap_or("");
    if content.is_empty() {
        return Err(ApiError::Validation("Content is required".into()));
    }
    let updated_by = match body["updatedBy"].as_str() {
        Some(name) if !name.is_empty() => name,
        _ => "admin",
    };

    let data = MasterData::new_revision(content, updated_by);
    state.store.save(&data)?;
    tracing::info!(
        "📝 Master data updated by {} ({} chars)",
        data.updated_by,
        data.content.chars().count()
    );

    // No connected WS clients is fine.
    let _ = state.updates.send(data.clone());

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Master data updated successfully",
        "data": data,
    })))
}

/// Chat with the configured provider, grounded in the master-data context.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_message = body["message"].as_str().unwrap_or("");
    if user_message.is_empty() {
        return Err(ApiError::Validation("Message is required".into()));
    }

    let data = state.store.load()?;
    let context = build_context(&data.content, user_message);
    let system_prompt = state.config.identity.render_system_prompt(&context);

    // [system, ...history, user]. A history entry that does not parse as a
    // chat message is dropped rather than failing the request.
    let mut messages = vec![Message::system(system_prompt)];
    if let Some(history) = body.get("conversationHistory") {
        let history: Vec<Message> = serde_json::from_value(history.clone()).unwrap_or_default();
        messages.extend(history);
    }
    messages.push(Message::user(user_message));
    tracing::debug!("💬 Chat request: {} message(s) outbound", messages.len());

    let params = GenerateParams::from_llm_config(&state.config.llm);
    let response = state.provider.chat(&messages, &params).await?;

    match response.content {
        Some(text) => Ok(Json(serde_json::json!({"success": true, "response": text}))),
        None => Err(ApiError::Upstream("Failed to get response from AI".into())),
    }
}

/// Segment, index, and rank the master data against a query.
pub async fn rag_search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let query = body["query"].as_str().unwrap_or("");
    if query.is_empty() {
        return Err(ApiError::Validation("Query is required".into()));
    }
    let max_results = body["maxResults"]
        .as_u64()
        .unwrap_or(DEFAULT_MAX_RESULTS as u64) as usize;

    let data = state.store.load()?;
    let segments = segment_text(&data.content, DEFAULT_MAX_CHUNK_CHARS);
    let index = LexicalIndex::build(&segments);
    let ranked = search(query, &segments, &index, max_results);

    let results: Vec<_> = ranked
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.segment.id,
                "content": r.segment.content,
                "metadata": {
                    "chunkIndex": r.segment.chunk_index,
                    "wordCount": r.segment.word_count,
                    "charCount": r.segment.char_count,
                },
                "relevanceScore": r.score,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "results": results,
        "totalSegments": segments.len(),
        "query": query,
        "resultCount": results.len(),
    })))
}
