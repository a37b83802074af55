/// Member registration endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/members
/// Content-Type: application/x-www-form-urlencoded
///
/// email=taro%40example.jp&password=secret1&name=Taro&nickname=taro&hobby1=1&hobby2=&hobby3=3
/// ```
///
/// # Response (201)
///
/// ```json
/// {
///   "member_id": 1,
///   "email": "taro@example.jp",
///   "name": "Taro",
///   "nickname": "taro",
///   "hobbies": [{ "id": 1, "label": "Reading" }, { "id": 3, "label": "Sports" }],
///   "message": "Thank you for registering."
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: a validation rule failed or the email is
///   already registered; `details` lists every `{field, rule, message}`
/// - `500 Internal Server Error`: the store failed unexpectedly

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Form, Json};
use members_shared::form::{AddMemberForm, Outcome};
use members_shared::hobbies::{HobbyCatalog, HobbyEntry};
use members_shared::models::RegisteredMember;
use members_shared::validation::Submission;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Message shown on the thanks view
pub const THANKS_MESSAGE: &str = "Thank you for registering.";

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterMemberResponse {
    /// New member ID
    pub member_id: i64,

    /// Registered email
    pub email: String,

    /// Profile name
    pub name: String,

    /// Profile nickname
    pub nickname: String,

    /// Selected hobbies in submission order
    pub hobbies: Vec<HobbyEntry>,

    /// Confirmation message
    pub message: String,
}

impl RegisterMemberResponse {
    fn new(registered: RegisteredMember, catalog: &HobbyCatalog) -> Self {
        let hobbies = registered
            .hobbies
            .iter()
            .map(|hobby| HobbyEntry {
                id: hobby.hobby_id,
                label: catalog.label(hobby.hobby_id).unwrap_or_default().to_string(),
            })
            .collect();

        Self {
            member_id: registered.member.id,
            email: registered.member.email,
            name: registered.profile.name,
            nickname: registered.profile.nickname,
            hobbies,
            message: THANKS_MESSAGE.to_string(),
        }
    }
}

/// Registers a new member from a form submission
///
/// Validation failures and duplicate emails both surface as 422 with the
/// full set of violated rules, so the form can be re-rendered with inline
/// messages.
pub async fn register_member(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> ApiResult<(StatusCode, Json<RegisterMemberResponse>)> {
    let submission = Submission::from(fields);
    debug!(
        email = submission.get("email").unwrap_or_default(),
        "Processing registration"
    );

    let mut form = AddMemberForm::new(state.validator.clone(), state.store.clone());
    form.execute(&submission).await;

    match form.into_outcome() {
        Some(Outcome::Registered(registered)) => {
            info!(member_id = registered.member.id, "Registration completed");
            Ok((
                StatusCode::CREATED,
                Json(RegisterMemberResponse::new(registered, &state.catalog)),
            ))
        }
        Some(Outcome::Failed(errors)) => Err(errors.into()),
        None => Err(ApiError::InternalError(
            "Registration form produced no outcome".to_string(),
        )),
    }
}
