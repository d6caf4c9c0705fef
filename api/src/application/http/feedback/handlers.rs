pub mod get_feedback;
pub mod get_feedback_summary;
pub mod submit_feedback;
