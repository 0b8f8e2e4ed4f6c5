//! Deferred payload retrieval.
//!
//! Parsing a manifest is a pure, offline operation: payload-carrying actions
//! (files) record *where* their bytes can be found, not the bytes themselves.
//! The [`ContentSource`] value holds the owning package reference and the
//! content digest; the bytes are only fetched when [`ContentSource::fetch`]
//! is invoked with a caller-supplied [`ContentRetriever`].
//!
//! The core places no guarantee on when or how many times `fetch` is called.
//! Callers may invoke it concurrently for independent actions; the retriever
//! implementation is responsible for its own safety under repeated calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fmri::Fmri;

/// Errors from the content retrieval boundary.
#[derive(Debug, Error)]
pub enum RetrieveError {
  /// The retriever has no content for the requested digest.
  #[error("no content found for digest '{digest}'")]
  NotFound { digest: String },

  /// Transport or storage failure while fetching content.
  #[error("failed to retrieve content '{digest}': {source}")]
  Io {
    digest: String,
    #[source]
    source: std::io::Error,
  },
}

/// The content retrieval collaborator.
///
/// Given the owning package reference and a content digest, returns the
/// associated payload bytes. Implementations live outside this crate
/// (repository client, local store, test mock).
pub trait ContentRetriever {
  fn fetch(&self, fmri: Option<&Fmri>, digest: &str) -> Result<Vec<u8>, RetrieveError>;
}

/// A deferred reference to one action's payload bytes.
///
/// Bound by the manifest when a payload-carrying action line is parsed,
/// capturing the manifest's package reference and the action's digest.
/// Being a plain value (not a closure) keeps it serializable, comparable,
/// and easy to mock in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
  /// The package this content belongs to, if the manifest declared one.
  pub fmri: Option<Fmri>,
  /// The content digest identifying the payload.
  pub digest: String,
}

impl ContentSource {
  pub fn new(fmri: Option<Fmri>, digest: impl Into<String>) -> Self {
    Self {
      fmri,
      digest: digest.into(),
    }
  }

  /// Fetch the payload bytes through the given retriever.
  ///
  /// This is the only operation in the crate that performs I/O, and it does
  /// so entirely through the collaborator.
  pub fn fetch(&self, retriever: &dyn ContentRetriever) -> Result<Vec<u8>, RetrieveError> {
    retriever.fetch(self.fmri.as_ref(), &self.digest)
  }
}
