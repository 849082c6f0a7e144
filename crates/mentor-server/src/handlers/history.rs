use crate::error::{ChatError, ErrorBody, Result};
use crate::models::{HistoryQuery, HistoryResponse, MessageDto};
use crate::state::AppState;
use actix_web::{web, HttpResponse};

pub async fn handler(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    match state
        .chat
        .history(&query.private_id, query.limit, query.before_timestamp)
        .await
    {
        Ok((messages, personality_assigned)) => Ok(HttpResponse::Ok().json(HistoryResponse {
            status: "success",
            messages: messages.into_iter().map(MessageDto::from).collect(),
            personality_assigned,
        })),
        // The client treats 400 on a history lookup as "this privateID has
        // no chat yet" and shows the questionnaire.
        Err(ChatError::SessionNotFound) => Ok(HttpResponse::BadRequest()
            .json(ErrorBody::new("no session exists for this privateID"))),
        Err(e) => Err(e),
    }
}
