use std::fmt;

use super::{capability::CatalogError, error::RecommendError};

/// Why a call contributed nothing to the candidate pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The call succeeded but returned no items.
    NoResults,
    /// The call failed with a recoverable error.
    Failed(CatalogError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoResults => f.write_str("no results"),
            SkipReason::Failed(err) => write!(f, "{}", err),
        }
    }
}

/// Record of one external call made during a pipeline run.
///
/// `query` is the search string for searches and a short description
/// (e.g. `top tracks (medium_term)`) for history lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Accepted {
        query: String,
        fetched: usize,
        accepted: usize,
    },
    Skipped {
        query: String,
        reason: SkipReason,
    },
}

impl QueryOutcome {
    pub fn query(&self) -> &str {
        match self {
            QueryOutcome::Accepted { query, .. } | QueryOutcome::Skipped { query, .. } => query,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            QueryOutcome::Skipped { reason, .. } => Some(reason),
            QueryOutcome::Accepted { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_reason().is_some()
    }
}

/// Ordered log of [`QueryOutcome`]s for one run.
#[derive(Debug, Default)]
pub struct Ledger {
    outcomes: Vec<QueryOutcome>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwraps a catalog result.
    ///
    /// Authorization failures abort the run. Any other failure is logged,
    /// recorded as skipped and turned into `Ok(None)` so the caller moves on to
    /// its next alternative.
    pub(crate) fn check<T>(
        &mut self,
        query: &str,
        result: Result<T, CatalogError>,
    ) -> Result<Option<T>, RecommendError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(CatalogError::Unauthorized(msg)) => Err(RecommendError::Unauthorized(msg)),
            Err(err) => {
                log::warn!("Skipping {:?}: {}", query, err);
                self.outcomes.push(QueryOutcome::Skipped {
                    query: query.to_string(),
                    reason: SkipReason::Failed(err),
                });
                Ok(None)
            }
        }
    }

    /// Records a successful call; zero fetched items count as skipped.
    pub(crate) fn record(&mut self, query: &str, fetched: usize, accepted: usize) {
        if fetched == 0 {
            self.skip_empty(query);
            return;
        }

        log::debug!("{:?}: accepted {}/{}", query, accepted, fetched);
        self.outcomes.push(QueryOutcome::Accepted {
            query: query.to_string(),
            fetched,
            accepted,
        });
    }

    pub(crate) fn skip_empty(&mut self, query: &str) {
        log::debug!("{:?}: no results", query);
        self.outcomes.push(QueryOutcome::Skipped {
            query: query.to_string(),
            reason: SkipReason::NoResults,
        });
    }

    pub fn outcomes(&self) -> &[QueryOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<QueryOutcome> {
        self.outcomes
    }
}
