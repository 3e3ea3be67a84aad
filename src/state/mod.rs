//! State management module
//!
//! This module holds the session container, its persistence layer, the
//! entity workflow state machines and the application context.

pub mod context;
pub mod session;
pub mod storage;
pub mod workflow;

// Re-export commonly used state components
pub use context::AppContext;
pub use session::{SessionStore, SessionSnapshot};
pub use storage::{SessionStorage, TOKEN_KEY, USER_KEY};
pub use workflow::{
    StatusMachine, StatusEntity, StatusTransition, ReporterAction,
    prepare_transition, prepare_news_rejection, commit_transition,
};
