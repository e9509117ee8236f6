use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{error::AppResult, models::CarouselItem, routes::AppState};

/// Handler listing titles similar to one show
pub async fn similar(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<String>,
) -> AppResult<Json<Vec<CarouselItem>>> {
    tracing::debug!(show_id = %show_id, "Looking up similar shows");

    // Keys with control characters are rejected before any lookup
    let items = state.carousels.similar_to_show(&show_id).await?;

    Ok(Json(items))
}
