use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub resume_id: String,
    pub candidate_id: String,
    pub uploaded_at: DateTime<Utc>,
    pub text: String,
    pub mentions: Vec<SkillMention>,
}

/// One skill named by a resume. Confidence and proficiency come from the
/// ingesting caller; ranking does not read them yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMention {
    pub skill: String,
    pub confidence: f32,
    pub proficiency: f32,
}
