/// Hobby catalog endpoint
///
/// # Endpoint
///
/// ```text
/// GET /v1/hobbies
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "id": 1, "label": "Reading" },
///   { "id": 2, "label": "Music" }
/// ]
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use members_shared::hobbies::HobbyEntry;

/// Lists the selectable hobbies in id order
pub async fn list_hobbies(State(state): State<AppState>) -> Json<Vec<HobbyEntry>> {
    Json(state.catalog.entries())
}
