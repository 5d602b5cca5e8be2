//! External collaborators the engine consumes and never implements:
//! user/course stores, market data, and the advisory cache.
//!
//! The in-memory implementations here back the CLI and the test suite;
//! production deployments plug their own stores into the same traits.

use async_trait::async_trait;
use pathwise_core::{Course, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Read access to user profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch one profile, `None` when unknown.
    async fn get(&self, user_id: &str) -> anyhow::Result<Option<UserProfile>>;

    /// Snapshot of every profile, with learning history, for
    /// collaborative filtering.
    async fn list_all(&self) -> anyhow::Result<Vec<UserProfile>>;
}

/// Read access to the course catalog.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Snapshot of every course.
    async fn list_all(&self) -> anyhow::Result<Vec<Course>>;

    /// Courses whose skill list matches `pattern` by case-insensitive
    /// substring.
    async fn find_by_skill(&self, pattern: &str) -> anyhow::Result<Vec<Course>>;
}

/// How sought-after a trending skill currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

impl DemandLevel {
    /// Get a short label for this demand level.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One trending skill from the market data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingSkill {
    /// Skill name.
    pub skill: String,
    /// Year-over-year growth rate, in percent.
    pub growth_rate: f64,
    /// Current demand level.
    pub demand: DemandLevel,
}

/// Market trend snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketTrends {
    /// Trending skills, unordered.
    pub trending_skills: Vec<TrendingSkill>,
}

/// Pluggable source of market trend data. The engine has no opinion on
/// its freshness or origin.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current trends.
    async fn trends(&self) -> anyhow::Result<MarketTrends>;
}

/// Advisory key-value memoization. Values are never authoritative: a
/// stale read is acceptable and a miss is always safe.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Look up a cached value.
    async fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Store a value with a time-to-live.
    async fn set(&self, key: &str, value: serde_json::Value, ttl: Duration);
}

/// In-memory user store over a fixed snapshot.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Vec<UserProfile>,
}

impl InMemoryUserStore {
    /// Store serving the given profiles.
    pub fn new(users: Vec<UserProfile>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, user_id: &str) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<UserProfile>> {
        Ok(self.users.clone())
    }
}

/// In-memory course store over a fixed snapshot.
#[derive(Debug, Default)]
pub struct InMemoryCourseStore {
    courses: Vec<Course>,
}

impl InMemoryCourseStore {
    /// Store serving the given courses.
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn list_all(&self) -> anyhow::Result<Vec<Course>> {
        Ok(self.courses.clone())
    }

    async fn find_by_skill(&self, pattern: &str) -> anyhow::Result<Vec<Course>> {
        let needle = pattern.to_lowercase();
        Ok(self
            .courses
            .iter()
            .filter(|course| {
                course
                    .skills
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }
}

/// Market data provider serving a fixed trend snapshot.
#[derive(Debug, Default)]
pub struct StaticMarketData {
    trends: MarketTrends,
}

impl StaticMarketData {
    /// Provider serving the given trends.
    pub fn new(trends: MarketTrends) -> Self {
        Self { trends }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn trends(&self) -> anyhow::Result<MarketTrends> {
        Ok(self.trends.clone())
    }
}

/// In-process TTL cache.
///
/// Expiry is checked on read; a concurrent set/get race resolves as
/// read-your-or-stale-write, which is fine for advisory values.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (serde_json::Value, Instant)>>,
}

impl MemoryCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), (value, Instant::now() + ttl));
    }
}
