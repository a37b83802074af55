/// Not-yet-persisted member drafts
///
/// [`MemberDraft::from_submission`] turns a validated submission into the
/// three-entity shape the store inserts: the member, its nested profile and
/// one hobby link per selected hobby field (`hobby1`, `hobby2`, `hobby3`
/// in that order, skipping empty ones).

use crate::validation::submission::{fields, parse_hobby_id, Submission};
use serde::{Deserialize, Serialize};

/// Profile part of a member draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub nickname: String,
}

/// Hobby link part of a member draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HobbyDraft {
    pub hobby_id: i32,
}

/// Composite draft handed to the store in one insert call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    pub email: String,
    pub password: String,
    pub profile: ProfileDraft,
    pub hobbies: Vec<HobbyDraft>,
}

impl MemberDraft {
    /// Builds the draft from submitted fields
    ///
    /// The submission is expected to have passed validation; absent text
    /// fields become empty strings and unselected or unparsable hobby fields
    /// are skipped.
    pub fn from_submission(submission: &Submission) -> Self {
        let text = |field: &str| submission.get(field).unwrap_or_default().to_string();

        let hobbies = fields::HOBBIES
            .iter()
            .filter_map(|field| submission.selected_hobby(field))
            .filter_map(parse_hobby_id)
            .map(|hobby_id| HobbyDraft { hobby_id })
            .collect();

        Self {
            email: text(fields::EMAIL),
            password: text(fields::PASSWORD),
            profile: ProfileDraft {
                name: text(fields::NAME),
                nickname: text(fields::NICKNAME),
            },
            hobbies,
        }
    }

    /// Hobby ids in submission order
    pub fn hobby_ids(&self) -> Vec<i32> {
        self.hobbies.iter().map(|hobby| hobby.hobby_id).collect()
    }
}
