//! Graph data provider contract
//!
//! The ranking engine never talks to a graph database directly. Everything it
//! needs is behind `GraphProvider`, so the same engine runs against the
//! built-in in-memory store, a Neo4j-backed implementation, or a scripted
//! test double.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

// ============================================================================
// GraphProvider trait
// ============================================================================

/// Read access to the candidate/job graph.
///
/// Implementations own their transport and report failures as
/// `ProviderError`. The engine does not retry; errors surface to the caller
/// unchanged.
#[async_trait]
pub trait GraphProvider: Send + Sync {
    /// Requirements of a job opening, or `None` when no job has that id.
    async fn job_requirements(
        &self,
        job_id: &str,
    ) -> Result<Option<JobRequirements>, ProviderError>;

    /// Candidates whose resumes mention at least one of the required skills,
    /// each paired with the subset of `required` they mention. Candidates
    /// with no overlap are never returned.
    async fn candidates_matching(
        &self,
        required: &BTreeSet<String>,
    ) -> Result<Vec<CandidateMatch>, ProviderError>;

    /// Sum of the candidate's recorded experience years. A candidate with no
    /// experience records totals `0.0`.
    async fn total_experience_years(&self, candidate_id: &str) -> Result<f64, ProviderError>;
}

// ============================================================================
// Provider payloads
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: BTreeSet<String>,
    pub min_experience_years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub candidate_id: String,
    pub matched_skills: BTreeSet<String>,
}
