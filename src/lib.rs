pub mod match_feed;
pub mod model_params;
pub mod score_model;
pub mod state;
