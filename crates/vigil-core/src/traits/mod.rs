pub mod storage;

pub use storage::IRecommendationStorage;
