use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{main_lib::AppState, models::UniverseEntry};

/// The selectable asset universe configured at startup.
pub async fn list_tickers(State(state): State<Arc<AppState>>) -> Json<Vec<UniverseEntry>> {
    Json(state.universe.clone())
}
