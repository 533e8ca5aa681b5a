//! In-memory graph store
//!
//! Reference `GraphProvider` backed by plain maps behind a `tokio` RwLock.
//! Write operations follow merge-or-create semantics:
//! - Re-ingesting a candidate or job id never overwrites the original
//!   name, title, or experience minimum
//! - Required skills accumulate across repeated job ingestions
//! - A resume id is accepted once; a second ingestion with the same id fails
//!
//! Suitable for the CLI, tests, and small datasets; a database-backed
//! provider would implement the same trait.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{ProviderError, StoreError};
use crate::models::{Candidate, Experience, JobOpening, Resume, SkillMention};
use crate::provider::{CandidateMatch, GraphProvider, JobRequirements};

#[derive(Debug, Default)]
pub struct MemoryGraph {
    inner: RwLock<GraphInner>,
}

#[derive(Debug, Default)]
struct GraphInner {
    candidates: HashMap<String, Candidate>,
    /// Resumes by resume id; ownership lives on the `Resume` itself.
    resumes: HashMap<String, Resume>,
    jobs: HashMap<String, JobOpening>,
    /// Experience records by candidate id.
    experience: HashMap<String, Vec<Experience>>,
    /// Candidate ids whose resumes mention a skill, by skill name.
    mentioned_by: HashMap<String, BTreeSet<String>>,
}

impl GraphInner {
    fn upsert_candidate(&mut self, candidate_id: &str, name: &str) {
        self.candidates
            .entry(candidate_id.to_string())
            .or_insert_with(|| Candidate {
                candidate_id: candidate_id.to_string(),
                name: name.to_string(),
                created_at: Utc::now(),
            });
    }
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the candidate if its id is new; an existing candidate keeps
    /// its original name.
    pub async fn register_candidate(&self, candidate_id: &str, name: &str) {
        let mut inner = self.inner.write().await;
        inner.upsert_candidate(candidate_id, name);
    }

    /// Ingest a resume for a candidate, creating the candidate when the id
    /// is new. Skills repeated within one resume collapse to the first
    /// mention. Fails if the resume id was already ingested.
    pub async fn ingest_candidate(
        &self,
        candidate_id: &str,
        name: &str,
        resume_id: &str,
        text: &str,
        mentions: Vec<SkillMention>,
    ) -> Result<(), StoreError> {
        for m in &mentions {
            if !(0.0..=1.0).contains(&m.confidence) || !(0.0..=1.0).contains(&m.proficiency) {
                return Err(StoreError::InvalidValue(format!(
                    "mention of {} has confidence or proficiency outside [0, 1]",
                    m.skill
                )));
            }
        }

        let mut inner = self.inner.write().await;

        if inner.resumes.contains_key(resume_id) {
            return Err(StoreError::DuplicateResume(resume_id.to_string()));
        }

        inner.upsert_candidate(candidate_id, name);

        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut deduped: Vec<SkillMention> = Vec::with_capacity(mentions.len());
        for m in mentions {
            if seen.insert(m.skill.clone()) {
                deduped.push(m);
            }
        }

        for m in &deduped {
            inner
                .mentioned_by
                .entry(m.skill.clone())
                .or_default()
                .insert(candidate_id.to_string());
        }

        inner.resumes.insert(
            resume_id.to_string(),
            Resume {
                resume_id: resume_id.to_string(),
                candidate_id: candidate_id.to_string(),
                uploaded_at: Utc::now(),
                text: text.to_string(),
                mentions: deduped,
            },
        );

        tracing::info!("Ingested resume {} for candidate {}", resume_id, candidate_id);
        Ok(())
    }

    /// Ingest a job opening. A new job id creates the job; an existing one
    /// keeps its title and minimum and unions in the required skills.
    pub async fn ingest_job(
        &self,
        job_id: &str,
        title: &str,
        required_skills: Vec<String>,
        min_experience_years: f64,
    ) -> Result<(), StoreError> {
        if !min_experience_years.is_finite() || min_experience_years < 0.0 {
            return Err(StoreError::InvalidValue(format!(
                "min_experience_years must be non-negative, got {}",
                min_experience_years
            )));
        }

        let mut inner = self.inner.write().await;

        let job = inner
            .jobs
            .entry(job_id.to_string())
            .or_insert_with(|| JobOpening {
                job_id: job_id.to_string(),
                title: title.to_string(),
                min_experience_years,
                posted_at: Utc::now(),
                required_skills: BTreeSet::new(),
            });
        job.required_skills.extend(required_skills);

        tracing::info!("Ingested job {}", job_id);
        Ok(())
    }

    /// Record years worked in a role for an existing candidate.
    pub async fn add_experience(
        &self,
        candidate_id: &str,
        role: &str,
        years: f64,
    ) -> Result<(), StoreError> {
        if !years.is_finite() || years < 0.0 {
            return Err(StoreError::InvalidValue(format!(
                "years must be non-negative, got {}",
                years
            )));
        }

        let mut inner = self.inner.write().await;

        if !inner.candidates.contains_key(candidate_id) {
            return Err(StoreError::UnknownCandidate(candidate_id.to_string()));
        }

        inner
            .experience
            .entry(candidate_id.to_string())
            .or_default()
            .push(Experience {
                role: role.to_string(),
                years,
            });

        tracing::debug!("Recorded {} years of {} for {}", years, role, candidate_id);
        Ok(())
    }

    pub async fn candidate(&self, candidate_id: &str) -> Option<Candidate> {
        self.inner.read().await.candidates.get(candidate_id).cloned()
    }

    pub async fn job(&self, job_id: &str) -> Option<JobOpening> {
        self.inner.read().await.jobs.get(job_id).cloned()
    }
}

#[async_trait]
impl GraphProvider for MemoryGraph {
    async fn job_requirements(
        &self,
        job_id: &str,
    ) -> Result<Option<JobRequirements>, ProviderError> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.get(job_id).map(|job| JobRequirements {
            required_skills: job.required_skills.clone(),
            min_experience_years: job.min_experience_years,
        }))
    }

    async fn candidates_matching(
        &self,
        required: &BTreeSet<String>,
    ) -> Result<Vec<CandidateMatch>, ProviderError> {
        let inner = self.inner.read().await;

        let mut matched: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for skill in required {
            if let Some(candidate_ids) = inner.mentioned_by.get(skill) {
                for candidate_id in candidate_ids {
                    matched
                        .entry(candidate_id.clone())
                        .or_default()
                        .insert(skill.clone());
                }
            }
        }

        Ok(matched
            .into_iter()
            .map(|(candidate_id, matched_skills)| CandidateMatch {
                candidate_id,
                matched_skills,
            })
            .collect())
    }

    async fn total_experience_years(&self, candidate_id: &str) -> Result<f64, ProviderError> {
        let inner = self.inner.read().await;
        Ok(inner
            .experience
            .get(candidate_id)
            .map(|records| records.iter().map(|e| e.years).sum())
            .unwrap_or(0.0))
    }
}

// ============================================================================
// TESTS
// ============================================================================
