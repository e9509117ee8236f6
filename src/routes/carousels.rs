use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{CarouselSet, UserId},
    routes::AppState,
};

/// Handler for a user's personalized home screen
///
/// The user id arrives already resolved by the identity layer in front of
/// this service.
pub async fn get_carousels(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<CarouselSet>> {
    tracing::info!(request_id = %request_id, user_id, "Building carousels");

    // Unknown users surface as 404 through AppError
    let set = state.carousels.build_carousel_set(user_id).await?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        carousels = set.carousels.len(),
        "Carousels built"
    );

    Ok(Json(set))
}
