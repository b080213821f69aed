// Suggestion queue: candidate template phrases submitted by clinicians and
// folded into the Template Store by an administrator.

pub mod approve;
pub mod handlers;
pub mod models;
pub mod naming;
pub mod submit;

pub use models::FieldError;
