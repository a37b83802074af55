/// Database models and drafts for member registration
///
/// # Models
///
/// - `member`: Member accounts and the persisted registration aggregate
/// - `profile`: One profile per member (name, nickname)
/// - `hobby`: Hobby links (one to three per member)
/// - `draft`: Not-yet-persisted drafts built from a submission

pub mod draft;
pub mod hobby;
pub mod member;
pub mod profile;

pub use draft::{HobbyDraft, MemberDraft, ProfileDraft};
pub use hobby::MemberHobby;
pub use member::{Member, RegisteredMember};
pub use profile::MemberProfile;
