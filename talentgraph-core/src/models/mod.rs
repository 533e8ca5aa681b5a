pub mod candidate;
pub mod experience;
pub mod job;
pub mod resume;

pub use candidate::Candidate;
pub use experience::Experience;
pub use job::JobOpening;
pub use resume::{Resume, SkillMention};
