//! Interactive result window for `glint`.
//!
//! This crate owns everything between a search backend and the terminal:
//! panel geometry, list rendering, paging through the backend's pages,
//! debounced previews and the session that ties them together. The
//! [`run`] entry point hosts a session on a ratatui terminal.

pub mod host;
pub mod input;
pub mod layout;
pub mod preview;
pub mod render;
mod runtime;
pub mod selection;
pub mod session;
pub mod style;

pub use host::Surface;
pub use input::QueryInput;
pub use layout::{
	BorderStyle, Geometry, LayoutConfig, PreviewPosition, PromptPosition, Ratio, compute_layout,
};
pub use runtime::run;
pub use session::{
	Backends, Commit, CommitAction, CommitTarget, ListEntry, Session, SessionConfig, SessionError,
	SessionOutcome,
};
pub use style::{Theme, default_theme};
