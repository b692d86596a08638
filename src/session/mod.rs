//! Sessions.
//!
//! A [`QuerySession`] owns the collaborator handles and the reflected schema
//! for one connection target. The [`Workspace`] holds at most one session
//! together with the report builder.
//!
//! # Error policy
//!
//! | Call                 | Failure handling                          |
//! |----------------------|-------------------------------------------|
//! | `connect`            | [`SessionError::Connection`], no session  |
//! | `list_tables`        | [`SessionError::Schema`], snapshot kept   |
//! | `columns_for`        | unknown table is an empty list            |
//! | `suggest_shapes_for` | absorbed into [`BestEffort`], empty list  |
//! | `run_report`         | [`SessionError::Execution`], propagated   |

mod error;
mod query_session;
mod workspace;

pub use error::{BestEffort, SessionError, SessionResult};
pub use query_session::{QuerySession, ReportOutcome};
pub use workspace::Workspace;
