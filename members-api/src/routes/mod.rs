/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `hobbies`: Hobby catalog endpoint
/// - `members`: Member registration endpoint

pub mod health;
pub mod hobbies;
pub mod members;
