//! Attachment endpoints: registration, lookup and keyword hints

use crate::config::UPLOAD_FILES_CAPABILITY;
use crate::server::routes::ApiResponse;
use crate::server::routes::guard::authorize;
use crate::server::state::AppState;
use crate::server::types::{AttachmentView, KeywordsRequest};
use crate::storage::NewAttachment;
use crate::utils::error::{AltFriendError, Result};
use actix_web::{HttpRequest, HttpResponse, web};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attachments")
            .route("", web::post().to(register))
            .route("/{id}", web::get().to(get_attachment))
            .route("/{id}/keywords", web::put().to(set_keywords)),
    );
}

/// Register an attachment; may generate alt text when auto-generation is on
pub async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<NewAttachment>,
) -> Result<HttpResponse> {
    authorize(&req, state.config.security(), UPLOAD_FILES_CAPABILITY)
        .map_err(AltFriendError::Generation)?;

    let request = request.into_inner();
    if request.url.trim().is_empty() || request.mime_type.trim().is_empty() {
        return Err(AltFriendError::bad_request("url and mime_type are required"));
    }

    let attachment = state.service.register_attachment(request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(AttachmentView::from(attachment))))
}

pub async fn get_attachment(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> Result<HttpResponse> {
    authorize(&req, state.config.security(), UPLOAD_FILES_CAPABILITY)
        .map_err(AltFriendError::Generation)?;

    let attachment = state.service.get_attachment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(AttachmentView::from(attachment))))
}

/// Replace the keyword hints; an empty string clears them
pub async fn set_keywords(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
    request: web::Json<KeywordsRequest>,
) -> Result<HttpResponse> {
    authorize(&req, state.config.security(), UPLOAD_FILES_CAPABILITY)
        .map_err(AltFriendError::Generation)?;

    let attachment = state
        .service
        .set_keywords(path.into_inner(), &request.keywords)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(AttachmentView::from(attachment))))
}
