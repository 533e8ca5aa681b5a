pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod ranking;
pub mod store;

pub use config::{RankingConfig, ServiceConfig, TalentGraphConfig};
pub use error::{ProviderError, RankError, StoreError};
pub use models::{Candidate, Experience, JobOpening, Resume, SkillMention};
pub use provider::{CandidateMatch, GraphProvider, JobRequirements};
pub use ranking::{RankedCandidate, RankingEngine, EXPERIENCE_WEIGHT, SKILL_WEIGHT};
pub use store::MemoryGraph;
