//! Question answering endpoint: topic + question in, answer with references out.

use axum::{extract::State, response::Json};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use biomechqa_common::{QaError, QaResult, QuestionRequest, Topic, TopicOption};
use crate::state::SharedState;

/// POST /api/qa
///
/// Unknown topics are rejected before any process is started. Every other
/// failure (script error, timeout, missing or malformed result) comes back as
/// a 500 with an `error` field.
pub async fn qa_submit(
    State(state): State<SharedState>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<QaResult>, QaError> {
    let topic = req.topic.parse::<Topic>().map_err(|e| {
        warn!(topic = %req.topic, "Rejected unknown topic");
        e
    })?;
    let corpus_dir = state.corpus_dir(topic);

    let span = info_span!("qa", request_id = %Uuid::new_v4(), topic = %topic);
    async move {
        info!(corpus_dir = %corpus_dir.display(), question = %req.question, "Answering question");
        match state.backend.ask(&corpus_dir, &req.question).await {
            Ok(result) => {
                info!(references = result.references.len(), "Question answered");
                Ok(Json(result))
            }
            Err(e) => {
                error!(error = %e, "Failed to answer question");
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}

/// GET /api/topics: topic selector entries in catalogue order.
pub async fn api_topics() -> Json<Vec<TopicOption>> {
    Json(Topic::ALL.into_iter().map(TopicOption::from).collect())
}
