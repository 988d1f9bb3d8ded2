pub mod analytics;
pub mod assessments;
pub mod attempts;
pub mod problems;
