use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOpening {
    pub job_id: String,
    pub title: String,
    pub min_experience_years: f64,
    pub posted_at: DateTime<Utc>,
    pub required_skills: BTreeSet<String>,
}
