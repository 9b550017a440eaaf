use thiserror::Error;

/// Failures reported by a search backend.
#[derive(Debug, Error)]
pub enum BackendError {
	#[error("{backend} search failed: {message}")]
	Search {
		backend: &'static str,
		message: String,
	},
	#[error("continuation token `{0}` is not valid for this backend")]
	InvalidToken(String),
	#[error("{backend} backend does not support {origin} paging")]
	UnsupportedOrigin {
		backend: &'static str,
		origin: &'static str,
	},
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl BackendError {
	pub fn search(backend: &'static str, message: impl Into<String>) -> Self {
		Self::Search {
			backend,
			message: message.into(),
		}
	}
}
