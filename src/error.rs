//! Error type for mounting and DOM access.

/// Failures surfaced by circle-canvas.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// No element with the given id.
	#[error("container element not found: {0}")]
	MissingContainer(String),
	/// Not running in a browser window.
	#[error("no global window")]
	NoWindow,
	/// Window without a document.
	#[error("window has no document")]
	NoDocument,
	/// A browser call threw, or returned the wrong type.
	#[error("DOM operation failed: {0}")]
	Dom(String),
	/// Circle payload did not parse.
	#[error("invalid circle data: {0}")]
	Json(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for Error {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		Error::Dom(
			value
				.as_string()
				.unwrap_or_else(|| format!("{:?}", value)),
		)
	}
}

/// Result alias for circle-canvas operations.
pub type Result<T> = std::result::Result<T, Error>;
