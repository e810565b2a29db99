pub mod analysis_ops;
pub mod maintenance;
pub mod recommendation_crud;
