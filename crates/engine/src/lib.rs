//! Hybrid course recommendation engine.
//!
//! Combines four independent signals over an immutable per-request
//! snapshot: collaborative filtering on the user-course interaction
//! matrix, content similarity between profile and course text,
//! market trends and career-goal gaps, and behavioral preferences
//! observed in completed history. The weighted combination is then
//! diversity-filtered, stripped of completed courses, and enriched
//! with human-readable explanations.

pub mod combine;
pub mod config;
mod engine;
pub mod explain;
pub mod matrix;
pub mod scorers;
pub mod stores;

pub use combine::SourceWeights;
pub use config::EngineConfig;
pub use engine::{RecommendOptions, RecommendationEngine};
pub use stores::{
    Cache, CourseStore, DemandLevel, InMemoryCourseStore, InMemoryUserStore, MarketDataProvider,
    MarketTrends, MemoryCache, StaticMarketData, TrendingSkill, UserStore,
};
