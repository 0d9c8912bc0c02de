//! Alt text generation and enumeration endpoints

use crate::config::UPLOAD_FILES_CAPABILITY;
use crate::server::routes::guard::authorize;
use crate::server::state::AppState;
use crate::server::types::{
    BulkGenerateRequest, GenerateRequest, GenerateResponse, MissingImagesResponse,
};
use crate::services::split_outcome;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, info, warn};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/alt-text")
            .route("/generate", web::post().to(generate))
            .route("/bulk/generate", web::post().to(bulk_generate))
            .route("/missing", web::get().to(missing)),
    );
}

fn respond(response: GenerateResponse) -> HttpResponse {
    if let Some(kind) = response.error_kind {
        warn!(
            "Generation failed ({}): {}",
            kind,
            response.message.as_deref().unwrap_or_default()
        );
    }
    HttpResponse::build(response.status_code()).json(response)
}

/// Generate alt text for a caller-supplied image URL and store it on the attachment
pub async fn generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = authorize(&req, state.config.security(), UPLOAD_FILES_CAPABILITY) {
        return Ok(respond(GenerateResponse::failure(e, None)));
    }

    let request = request.into_inner();
    debug!("Single generate for attachment {:?}", request.attachment_id);

    let result = state
        .service
        .generate_single(
            request.attachment_id,
            request.image_url.as_deref(),
            request.keywords.as_deref(),
        )
        .await;

    Ok(respond(GenerateResponse::from_outcome(
        split_outcome(result)?,
        None,
    )))
}

/// Generate alt text for a stored attachment, echoing its id
pub async fn bulk_generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<BulkGenerateRequest>,
) -> Result<HttpResponse> {
    let attachment_id = request.attachment_id;
    if let Err(e) = authorize(&req, state.config.security(), UPLOAD_FILES_CAPABILITY) {
        return Ok(respond(GenerateResponse::failure(e, attachment_id)));
    }

    let result = state.service.generate_for_attachment(attachment_id).await;

    Ok(respond(GenerateResponse::from_outcome(
        split_outcome(result)?,
        attachment_id,
    )))
}

/// List image attachments whose alt text is absent or empty
pub async fn missing(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    if let Err(e) = authorize(&req, state.config.security(), UPLOAD_FILES_CAPABILITY) {
        let status = e.kind.status_code();
        return Ok(HttpResponse::build(status).json(MissingImagesResponse::failure(e)));
    }

    let images = state.service.list_missing().await?;
    info!("Enumerated {} images without alt text", images.len());

    Ok(HttpResponse::Ok().json(MissingImagesResponse::new(images)))
}
