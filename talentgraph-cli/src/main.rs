//! talentgraph — rank job candidates from a skills-and-experience graph
//!
//! Loads candidates, resumes, and job openings into the in-memory graph
//! store and prints the best-fitting candidates for one job opening.
//!
//! # Subcommands
//! - `rank --data <file> --job <id> [-n <N>] [--json]` — rank candidates from a dataset
//! - `demo [--json]`                                   — rank the built-in example scenario
//!
//! # Dataset format
//! A single JSON object with `candidates` and `jobs` arrays. Each candidate
//! carries its resumes (skill mentions with confidence and proficiency) and
//! experience records; each job carries its required skills and minimum
//! experience years.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use talentgraph_core::{
    GraphProvider, MemoryGraph, RankedCandidate, RankingEngine, SkillMention, TalentGraphConfig,
};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_CONFIG: &str = "talentgraph.toml";
const DEMO_JOB_ID: &str = "J100";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "talentgraph",
    version,
    about = "Rank job candidates from a skills-and-experience graph"
)]
struct Cli {
    /// Path to the TOML config file (overrides TALENTGRAPH_CONFIG env var)
    #[arg(long, env = "TALENTGRAPH_CONFIG", default_value = DEFAULT_CONFIG)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank candidates for a job opening from a JSON dataset
    Rank {
        /// Path to the dataset JSON file
        #[arg(long)]
        data: String,

        /// Job opening id to rank against
        #[arg(long)]
        job: String,

        /// Maximum number of candidates to return (config default when omitted)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Output results as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Seed the built-in example scenario and rank it
    Demo {
        /// Output results as a JSON array
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// Dataset Format
// ============================================================================

#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    candidates: Vec<CandidateRecord>,
    #[serde(default)]
    jobs: Vec<JobRecord>,
}

#[derive(Debug, Deserialize)]
struct CandidateRecord {
    candidate_id: String,
    name: String,
    #[serde(default)]
    resumes: Vec<ResumeRecord>,
    #[serde(default)]
    experience: Vec<ExperienceRecord>,
}

#[derive(Debug, Deserialize)]
struct ResumeRecord {
    resume_id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    skills: Vec<SkillRecord>,
}

#[derive(Debug, Deserialize)]
struct SkillRecord {
    name: String,
    confidence: f32,
    proficiency: f32,
}

#[derive(Debug, Deserialize)]
struct ExperienceRecord {
    role: String,
    years: f64,
}

#[derive(Debug, Deserialize)]
struct JobRecord {
    job_id: String,
    title: String,
    required_skills: Vec<String>,
    min_experience_years: f64,
}

// ============================================================================
// Graph Construction
// ============================================================================

async fn load_dataset(path: &str) -> anyhow::Result<MemoryGraph> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path))?;
    let dataset: Dataset =
        serde_json::from_str(&raw).with_context(|| format!("invalid dataset JSON in {}", path))?;
    build_graph(dataset).await
}

async fn build_graph(dataset: Dataset) -> anyhow::Result<MemoryGraph> {
    let graph = MemoryGraph::new();

    for c in dataset.candidates {
        graph.register_candidate(&c.candidate_id, &c.name).await;

        for r in c.resumes {
            let mentions: Vec<SkillMention> = r
                .skills
                .into_iter()
                .map(|s| SkillMention {
                    skill: s.name,
                    confidence: s.confidence,
                    proficiency: s.proficiency,
                })
                .collect();

            graph
                .ingest_candidate(&c.candidate_id, &c.name, &r.resume_id, &r.text, mentions)
                .await
                .with_context(|| format!("candidate {}", c.candidate_id))?;
        }

        for e in c.experience {
            graph
                .add_experience(&c.candidate_id, &e.role, e.years)
                .await
                .with_context(|| format!("candidate {}", c.candidate_id))?;
        }
    }

    for j in dataset.jobs {
        graph
            .ingest_job(&j.job_id, &j.title, j.required_skills, j.min_experience_years)
            .await
            .with_context(|| format!("job {}", j.job_id))?;
    }

    Ok(graph)
}

/// Example scenario: a full match with ample experience against a partial
/// match with none, for the J100 "Data Engineer" opening.
async fn demo_graph() -> anyhow::Result<MemoryGraph> {
    let graph = MemoryGraph::new();

    graph
        .ingest_candidate(
            "C123",
            "Alice Khan",
            "R123",
            "Experienced Python developer with Neo4j knowledge",
            vec![
                SkillMention {
                    skill: "Python".to_string(),
                    confidence: 0.95,
                    proficiency: 0.9,
                },
                SkillMention {
                    skill: "Neo4j".to_string(),
                    confidence: 0.9,
                    proficiency: 0.8,
                },
            ],
        )
        .await?;
    graph.add_experience("C123", "Data Engineer", 3.0).await?;

    graph
        .ingest_candidate(
            "C200",
            "Omar Reyes",
            "R200",
            "Python scripting for reporting pipelines",
            vec![SkillMention {
                skill: "Python".to_string(),
                confidence: 0.8,
                proficiency: 0.7,
            }],
        )
        .await?;

    graph
        .ingest_job(
            DEMO_JOB_ID,
            "Data Engineer",
            vec!["Python".to_string(), "Neo4j".to_string()],
            2.0,
        )
        .await?;

    Ok(graph)
}

// ============================================================================
// Ranking and Output
// ============================================================================

fn format_ranked_line(position: usize, r: &RankedCandidate) -> String {
    format!(
        "{:>2}. {}  score {:.3}  (skill {:.2}, experience {:.2})  matched: {}",
        position,
        r.candidate_id,
        r.score,
        r.skill_score,
        r.experience_score,
        r.matched_skills.join(", ")
    )
}

async fn run_rank(
    graph: Arc<MemoryGraph>,
    job_id: &str,
    top_n: usize,
    json: bool,
    config: &TalentGraphConfig,
) -> anyhow::Result<()> {
    let engine = RankingEngine::new(
        Arc::clone(&graph) as Arc<dyn GraphProvider>,
        config.ranking.clone(),
    );
    let ranked = engine.rank(job_id, top_n).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        eprintln!("No candidates matched job {}", job_id);
        return Ok(());
    }

    match graph.job(job_id).await {
        Some(job) => println!("Top candidates for {} ({})", job_id, job.title),
        None => println!("Top candidates for {}", job_id),
    }
    for (i, r) in ranked.iter().enumerate() {
        println!("{}", format_ranked_line(i + 1, r));
    }

    Ok(())
}

async fn rank_from_file(
    path: &str,
    job_id: &str,
    top_n: usize,
    json: bool,
    config: &TalentGraphConfig,
) -> anyhow::Result<()> {
    let graph = load_dataset(path).await?;
    run_rank(Arc::new(graph), job_id, top_n, json, config).await
}

async fn run_demo(top_n: usize, json: bool, config: &TalentGraphConfig) -> anyhow::Result<()> {
    let graph = demo_graph().await?;
    run_rank(Arc::new(graph), DEMO_JOB_ID, top_n, json, config).await
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    // Load .env file if present (dev convenience)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match TalentGraphConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level)),
        )
        .init();

    let result = match cli.command {
        Commands::Rank { data, job, top, json } => {
            let top_n = top.unwrap_or(config.ranking.default_top_n);
            rank_from_file(&data, &job, top_n, json, &config).await
        }
        Commands::Demo { json } => run_demo(config.ranking.default_top_n, json, &config).await,
    };

    if let Err(e) = result {
        eprintln!("talentgraph: {:#}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use talentgraph_core::RankingConfig;

    const DATASET: &str = r#"{
        "candidates": [
            {
                "candidate_id": "C123",
                "name": "Alice Khan",
                "resumes": [
                    {
                        "resume_id": "R123",
                        "text": "Experienced Python developer with Neo4j knowledge",
                        "skills": [
                            { "name": "Python", "confidence": 0.95, "proficiency": 0.9 },
                            { "name": "Neo4j", "confidence": 0.9, "proficiency": 0.8 }
                        ]
                    }
                ],
                "experience": [
                    { "role": "Data Engineer", "years": 3.0 }
                ]
            },
            {
                "candidate_id": "C200",
                "name": "Omar Reyes",
                "resumes": [
                    {
                        "resume_id": "R200",
                        "skills": [
                            { "name": "Python", "confidence": 0.8, "proficiency": 0.7 }
                        ]
                    }
                ]
            }
        ],
        "jobs": [
            {
                "job_id": "J100",
                "title": "Data Engineer",
                "required_skills": ["Python", "Neo4j"],
                "min_experience_years": 2.0
            }
        ]
    }"#;

    // ========================================================================
    // TEST 1: Ranked line formatting includes position, id, and components
    // ========================================================================
    #[test]
    fn test_format_ranked_line() {
        let ranked = RankedCandidate {
            candidate_id: "C123".to_string(),
            score: 1.0,
            skill_score: 1.0,
            experience_score: 1.0,
            matched_skills: vec!["Neo4j".to_string(), "Python".to_string()],
        };

        let line = format_ranked_line(1, &ranked);

        assert!(line.contains("C123"));
        assert!(line.contains("score 1.000"));
        assert!(line.contains("matched: Neo4j, Python"));
    }

    // ========================================================================
    // TEST 2: Dataset JSON parses, builds a graph, and ranks end to end
    // ========================================================================
    #[tokio::test]
    async fn test_dataset_ranks_end_to_end() {
        let dataset: Dataset = serde_json::from_str(DATASET).unwrap();
        let graph = Arc::new(build_graph(dataset).await.unwrap());

        let engine = RankingEngine::new(
            Arc::clone(&graph) as Arc<dyn GraphProvider>,
            RankingConfig::default(),
        );
        let ranked = engine.rank("J100", 5).await.unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate_id, "C123");
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
        assert_eq!(ranked[1].candidate_id, "C200");
        assert!((ranked[1].score - 0.3).abs() < 1e-9);
    }

    // ========================================================================
    // TEST 3: Missing optional dataset arrays default to empty
    // ========================================================================
    #[test]
    fn test_dataset_optional_arrays_default() {
        let dataset: Dataset = serde_json::from_str(r#"{ "jobs": [] }"#).unwrap();
        assert!(dataset.candidates.is_empty());
        assert!(dataset.jobs.is_empty());

        let candidate: CandidateRecord =
            serde_json::from_str(r#"{ "candidate_id": "C1", "name": "Solo" }"#).unwrap();
        assert!(candidate.resumes.is_empty());
        assert!(candidate.experience.is_empty());
    }

    // ========================================================================
    // TEST 4: The demo scenario ranks the full match first
    // ========================================================================
    #[tokio::test]
    async fn test_demo_graph_ranks_full_match_first() {
        let graph = Arc::new(demo_graph().await.unwrap());
        let engine = RankingEngine::new(
            Arc::clone(&graph) as Arc<dyn GraphProvider>,
            RankingConfig::default(),
        );

        let ranked = engine.rank(DEMO_JOB_ID, 5).await.unwrap();

        assert_eq!(ranked[0].candidate_id, "C123");
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
    }
}
