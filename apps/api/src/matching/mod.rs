// Skill-driven retrieval over the filtered listing set: pick vocabulary
// skills and see matching jobs, or paste a resume for a gap report plus
// suggested listings.

pub mod handlers;
pub mod matcher;
pub mod resume;
