//! Candidate-to-job ranking
//!
//! This module implements the composite fit score used to rank candidates
//! against a job opening:
//! - Skill score = matched required skills / total required skills
//! - Experience score = total years / job minimum, capped at 1.0
//! - Final score = 0.6 * skill + 0.4 * experience
//!
//! The formula is pure and testable on its own; `RankingEngine::rank` wires
//! it to a `GraphProvider` and fans out experience lookups concurrently.

use std::cmp::Ordering;
use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::config::RankingConfig;
use crate::error::{ProviderError, RankError};
use crate::provider::{CandidateMatch, GraphProvider};

/// Weight of the skill component in the final score
pub const SKILL_WEIGHT: f64 = 0.6;

/// Weight of the experience component in the final score
pub const EXPERIENCE_WEIGHT: f64 = 0.4;

/// A candidate scored against one job opening, with scoring components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    pub score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    /// Required skills this candidate's resumes mention, ascending.
    pub matched_skills: Vec<String>,
}

/// Fraction of the job's required skills the candidate matches.
///
/// `required_count` must be positive; `rank` rejects jobs with an empty
/// requirement set before scoring starts.
pub fn skill_score(matched_count: usize, required_count: usize) -> f64 {
    matched_count as f64 / required_count as f64
}

/// Experience credit relative to the job's minimum, capped at 1.0.
///
/// A job with no minimum (zero years) grants no experience credit, so such
/// jobs rank purely on skills rather than handing everyone the full 0.4.
pub fn experience_score(total_years: f64, min_experience_years: f64) -> f64 {
    if min_experience_years > 0.0 {
        (total_years / min_experience_years).min(1.0)
    } else {
        0.0
    }
}

/// Weighted combination of the two components.
pub fn composite_score(skill: f64, experience: f64) -> f64 {
    SKILL_WEIGHT * skill + EXPERIENCE_WEIGHT * experience
}

/// Order by score descending, candidate id ascending on ties, then truncate
/// to `top_n`. The secondary key makes equal-score output reproducible run
/// to run.
pub fn order_ranked(mut candidates: Vec<RankedCandidate>, top_n: usize) -> Vec<RankedCandidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });
    candidates.truncate(top_n);
    candidates
}

fn score_candidate(
    m: CandidateMatch,
    required_count: usize,
    total_years: f64,
    min_experience_years: f64,
) -> RankedCandidate {
    let skill = skill_score(m.matched_skills.len(), required_count);
    let experience = experience_score(total_years, min_experience_years);

    RankedCandidate {
        candidate_id: m.candidate_id,
        score: composite_score(skill, experience),
        skill_score: skill,
        experience_score: experience,
        matched_skills: m.matched_skills.into_iter().collect(),
    }
}

/// Stateless ranking engine over an injected graph provider.
///
/// Holds no per-request state, so one engine can serve concurrent `rank`
/// calls from multiple tasks.
pub struct RankingEngine {
    provider: Arc<dyn GraphProvider>,
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(provider: Arc<dyn GraphProvider>, config: RankingConfig) -> Self {
        Self { provider, config }
    }

    /// Rank candidates for a job opening
    ///
    /// # Arguments
    /// * `job_id` - Job opening to rank against
    /// * `top_n` - Maximum number of candidates to return (must be positive)
    ///
    /// # Returns
    /// * `Ok(Vec<RankedCandidate>)` - Best-first, at most `top_n` entries;
    ///   empty when no candidate matches any required skill
    /// * `Err(RankError)` - Bad input, unknown/invalid job, or a provider
    ///   failure passed through without retry
    ///
    /// # Algorithm
    /// 1. Fetch the job's requirements; unknown id is `JobNotFound`
    /// 2. Reject jobs with an empty requirement set (`InvalidJob`)
    /// 3. Fetch candidates matching at least one required skill
    /// 4. Fan out total-experience lookups, bounded by `experience_concurrency`
    /// 5. Score each candidate: 0.6 * skill + 0.4 * experience
    /// 6. Sort descending, tie-break on candidate id, truncate to `top_n`
    pub async fn rank(&self, job_id: &str, top_n: usize) -> Result<Vec<RankedCandidate>, RankError> {
        if top_n == 0 {
            return Err(RankError::InvalidArgument(
                "top_n must be positive".to_string(),
            ));
        }

        let requirements = self
            .provider
            .job_requirements(job_id)
            .await?
            .ok_or_else(|| RankError::JobNotFound(job_id.to_string()))?;

        let required_count = requirements.required_skills.len();
        if required_count == 0 {
            return Err(RankError::InvalidJob(job_id.to_string()));
        }

        let matches = self
            .provider
            .candidates_matching(&requirements.required_skills)
            .await?;

        tracing::debug!(
            "Scoring {} matched candidates for job {}",
            matches.len(),
            job_id
        );

        let min_years = requirements.min_experience_years;
        let concurrency = self.config.experience_concurrency.max(1);

        let lookups = matches.into_iter().map(|m| {
            let provider = Arc::clone(&self.provider);
            async move {
                let total_years = provider.total_experience_years(&m.candidate_id).await?;
                Ok::<RankedCandidate, ProviderError>(score_candidate(
                    m,
                    required_count,
                    total_years,
                    min_years,
                ))
            }
        });

        // Unordered completion is fine: ordering happens after the fact.
        let scored: Vec<RankedCandidate> = stream::iter(lookups)
            .buffer_unordered(concurrency)
            .try_collect()
            .await?;

        Ok(order_ranked(scored, top_n))
    }
}

// ============================================================================
// TESTS
// ============================================================================
