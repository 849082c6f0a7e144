use crate::error::Result;
use crate::models::{CreateChatRequest, CreateChatResponse};
use crate::state::AppState;
use actix_web::{web, HttpResponse};

pub async fn handler(
    state: web::Data<AppState>,
    body: web::Json<CreateChatRequest>,
) -> Result<HttpResponse> {
    state
        .chat
        .create_session(&body.private_id, &body.answers)
        .await?;
    // The arm assignment is deliberately not echoed back; participants only
    // learn that a personality exists.
    Ok(HttpResponse::Ok().json(CreateChatResponse {
        status: "success",
        personality_assigned: true,
    }))
}
