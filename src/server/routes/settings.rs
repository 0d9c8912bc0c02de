//! Settings endpoints

use crate::config::MANAGE_OPTIONS_CAPABILITY;
use crate::server::routes::ApiResponse;
use crate::server::routes::guard::authorize;
use crate::server::state::AppState;
use crate::services::SettingsUpdate;
use crate::utils::error::{AltFriendError, Result};
use actix_web::{HttpRequest, HttpResponse, web};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/settings")
            .route(web::get().to(get_settings))
            .route(web::put().to(update_settings)),
    );
}

pub async fn get_settings(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    authorize(&req, state.config.security(), MANAGE_OPTIONS_CAPABILITY)
        .map_err(AltFriendError::Generation)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(state.service.settings_view().await)))
}

/// Update settings; a malformed API key is rejected and the stored key kept
pub async fn update_settings(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<SettingsUpdate>,
) -> Result<HttpResponse> {
    authorize(&req, state.config.security(), MANAGE_OPTIONS_CAPABILITY)
        .map_err(AltFriendError::Generation)?;

    let view = state.service.update_settings(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}
