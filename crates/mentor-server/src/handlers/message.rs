use crate::error::Result;
use crate::models::{MessageDto, SendMessageRequest, SendMessageResponse};
use crate::state::AppState;
use actix_web::{web, HttpResponse};

pub async fn handler(
    state: web::Data<AppState>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse> {
    let reply = state
        .chat
        .send_message(&body.private_id, &body.user_message)
        .await?;
    Ok(HttpResponse::Ok().json(SendMessageResponse {
        status: "success",
        message: MessageDto::from(reply),
    }))
}
