// Report composer: pure rendering of the checkup report from an explicit
// session and the Template Store, plus explicit session persistence.

pub mod assemble;
pub mod bcs;
pub mod dental;
pub mod handlers;
pub mod overall;
pub mod physical;
pub mod session;

pub use assemble::{normalize_text, render_report, RenderedReport};
pub use session::{ReportSession, SessionError, SessionStore};
