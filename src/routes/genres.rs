use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{error::AppResult, models::Genre, routes::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreSummary {
    pub genre: Genre,
    pub label: &'static str,
    pub title_count: usize,
}

/// Handler listing the genre enumeration with catalog counts
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<GenreSummary>>> {
    // Fresh snapshot per request
    let catalog = state.carousels.catalog().await?;

    // Enumeration order, including genres with no titles
    let genres = Genre::ALL
        .iter()
        .map(|genre| GenreSummary {
            genre: *genre,
            label: genre.label(),
            title_count: catalog.genre_count(*genre),
        })
        .collect();

    Ok(Json(genres))
}
