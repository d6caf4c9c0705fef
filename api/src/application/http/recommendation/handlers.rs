pub mod get_recommendation;
