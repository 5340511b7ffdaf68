use super::session::{SessionLookup, session_cookie, session_id};
use super::{AppState, ChatRequest, PageDataRequest};
use crate::error::{MediaError, TurnError};
use crate::intent::{SCHEDULE_FORMAT, TurnOutcome};
use crate::publishing::{PublishCredential, PublishFailure, PublishOutcome};
use axum::{
    extract::{Multipart, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde_json::{Value, json};

type JsonResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: &str) -> JsonResponse {
    (status, Json(json!({"error": message})))
}

fn publish_response(outcome: PublishOutcome) -> JsonResponse {
    match outcome {
        PublishOutcome::Published { post_id, message } => (
            StatusCode::OK,
            Json(json!({
                "reply": format!("Post uploaded successfully! Message: {message}"),
                "post_id": post_id,
            })),
        ),
        PublishOutcome::Failed(failure) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "reply": "Post upload failed!",
                "error": failure,
            })),
        ),
    }
}

fn turn_response(outcome: TurnOutcome) -> JsonResponse {
    match outcome {
        TurnOutcome::Replied { reply } => (StatusCode::OK, Json(json!({"reply": reply}))),
        TurnOutcome::Published(outcome) => publish_response(outcome),
        TurnOutcome::Scheduled {
            reply,
            scheduled_at,
            receipt,
        } => (
            StatusCode::OK,
            Json(json!({
                "reply": reply,
                "scheduled_at": scheduled_at.format(SCHEDULE_FORMAT).to_string(),
                "task_id": receipt.map(|r| r.task_id.to_string()),
            })),
        ),
    }
}

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "pending_tasks": state.scheduler.pending_count(),
    }))
}

/// POST /chat
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(request)) = body else {
        return error_response(StatusCode::BAD_REQUEST, &TurnError::NoUserMessage.to_string());
    };

    let turns = request.into_turns();
    let credential = state.sessions.credential_for(&headers);

    match state.router.route(&turns, credential.as_ref()).await {
        Ok(outcome) => turn_response(outcome),
        Err(error) => error_response(StatusCode::BAD_REQUEST, &error.to_string()),
    }
}

/// POST /chat/upload
pub(super) async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let Some(media) = state.media.clone() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Image hosting is not configured",
        );
    };

    let mut upload: Option<(Vec<u8>, Option<String>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("image") => {
                let filename = field.file_name().map(ToOwned::to_owned);
                match field.bytes().await {
                    Ok(bytes) => upload = Some((bytes.to_vec(), filename)),
                    Err(error) => {
                        tracing::warn!(%error, "failed to read upload field");
                        return error_response(StatusCode::BAD_REQUEST, "No image file uploaded");
                    }
                }
            }
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(%error, "malformed multipart body");
                return error_response(StatusCode::BAD_REQUEST, "No image file uploaded");
            }
        }
    }

    let Some((bytes, filename)) = upload.filter(|(bytes, _)| !bytes.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "No image file uploaded");
    };

    let credential = state.sessions.credential_for(&headers);
    if credential.is_none() {
        tracing::warn!("upload rejected: no page credential in session");
        return publish_response(PublishOutcome::Failed(PublishFailure::missing_credential()));
    }

    let url = match media.store(bytes, filename.as_deref()).await {
        Ok(url) => url,
        Err(error) => {
            let status = match error.downcast_ref::<MediaError>() {
                Some(MediaError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
                Some(MediaError::Unsupported(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::BAD_GATEWAY,
            };
            tracing::error!(error = %error, "image upload failed");
            return (
                status,
                Json(json!({
                    "reply": "Post upload failed!",
                    "error": error.to_string(),
                })),
            );
        }
    };

    publish_response(state.posts.publish_photo(credential.as_ref(), &url).await)
}

/// POST /chat/facebook/page-data
pub(super) async fn handle_page_data(
    State(state): State<AppState>,
    body: Result<Json<PageDataRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid JSON payload").into_response();
    };

    let page_id = request.page_id.unwrap_or_default();
    let token = request.page_access_token.unwrap_or_default();
    let credential = PublishCredential::new(page_id.trim(), token.trim());
    if !credential.is_complete() {
        return error_response(StatusCode::BAD_REQUEST, "Missing pageId or pageAccessToken")
            .into_response();
    }

    tracing::info!(target_id = credential.target_id(), "stored page credential in session");
    let id = state.sessions.create(credential);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&id, state.sessions.ttl_secs()))],
        Json(json!({"message": "Page data stored in session"})),
    )
        .into_response()
}

/// GET /chat/facebook/check-session
pub(super) async fn handle_check_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let lookup = session_id(&headers).map_or(SessionLookup::Missing, |id| state.sessions.lookup(id));
    match lookup {
        SessionLookup::Missing => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "No session"})),
        ),
        SessionLookup::Incomplete => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Session found, but missing data"})),
        ),
        SessionLookup::Found(credential) => (
            StatusCode::OK,
            Json(json!({
                "message": "Welcome back!",
                "pageId": credential.target_id(),
            })),
        ),
    }
}
