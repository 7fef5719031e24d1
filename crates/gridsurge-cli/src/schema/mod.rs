pub mod high_score;
pub mod record;
