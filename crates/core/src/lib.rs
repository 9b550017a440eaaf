//! Core result-windowing engine for `glint`.
//!
//! This crate owns everything between a query and a page of items: the
//! backend interfaces, the pagination controller that hides exact-offset and
//! continuation-token paging behind one navigation model, the suggestion
//! fallback, and history cycling. Nothing here touches the terminal.

pub mod backend;
pub mod history;
mod item;
pub mod pagination;
pub mod progress;
pub mod suggestion;

pub use backend::{
	BackendError, BackendMetadata, ContinuationToken, PageOrigin, PagingKind, ScanProgress,
	SearchBackend, SearchOptions, SearchPage, SelectionMemory, TotalCount,
};
pub use item::{BackendMode, Item, Location, Query, QueryGeneration};
pub use pagination::{PageTurn, PageWindow, PaginationController, PaginationError};
pub use history::{HistoryCycler, HistoryError, HistorySource, HistoryStep, InMemoryHistory};
pub use progress::ScanPoller;
pub use suggestion::{DEFAULT_SUGGESTION_LIMIT, SuggestionState};
