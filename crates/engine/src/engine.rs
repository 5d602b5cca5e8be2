//! The recommendation engine: snapshot assembly, concurrent scoring,
//! and the combination pipeline.

use crate::combine::{completed_filter, diversity_filter, merge, WeightedSource};
use crate::config::EngineConfig;
use crate::explain::enrich;
use crate::scorers;
use crate::stores::{Cache, CourseStore, MarketDataProvider, MarketTrends, UserStore};
use chrono::{DateTime, Utc};
use pathwise_core::{
    Course, EngineError, Recommendation, Result, ScoredCandidate, SourceKind, UserProfile,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-request overrides. Anything unset falls back to the engine
/// config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendOptions {
    /// Maximum number of recommendations returned.
    pub limit: Option<usize>,
    /// Diversity factor in `[0, 1]`; higher spreads results further
    /// apart.
    pub diversity_factor: Option<f64>,
}

/// Immutable view of the world for one request. Built once, shared
/// read-only across the scorers.
struct Snapshot {
    profile: UserProfile,
    users: Vec<UserProfile>,
    courses: Vec<Course>,
    trends: MarketTrends,
    now: DateTime<Utc>,
}

/// One scoring pass over a snapshot.
///
/// The engine runs each scorer on its own blocking thread and isolates
/// failures: a panicking scorer contributes an empty list and the rest
/// still run.
trait Scorer: Send + Sync {
    /// Which source this scorer produces.
    fn kind(&self) -> SourceKind;

    /// Score the snapshot.
    fn run(&self, snapshot: &Snapshot, config: &EngineConfig) -> Vec<ScoredCandidate>;
}

struct CollaborativeScorer;

impl Scorer for CollaborativeScorer {
    fn kind(&self) -> SourceKind {
        SourceKind::Collaborative
    }

    fn run(&self, snapshot: &Snapshot, config: &EngineConfig) -> Vec<ScoredCandidate> {
        scorers::collaborative::score(
            &snapshot.profile.id,
            &snapshot.users,
            &snapshot.courses,
            config.min_similarity_threshold,
            config.max_neighbors,
        )
    }
}

struct ContentScorer;

impl Scorer for ContentScorer {
    fn kind(&self) -> SourceKind {
        SourceKind::Content
    }

    fn run(&self, snapshot: &Snapshot, config: &EngineConfig) -> Vec<ScoredCandidate> {
        scorers::content::score(
            &snapshot.profile,
            &snapshot.courses,
            config.min_similarity_threshold,
            config.max_candidates,
        )
    }
}

struct MarketScorer;

impl Scorer for MarketScorer {
    fn kind(&self) -> SourceKind {
        SourceKind::Market
    }

    fn run(&self, snapshot: &Snapshot, config: &EngineConfig) -> Vec<ScoredCandidate> {
        scorers::market::score(
            &snapshot.profile,
            &snapshot.trends,
            &snapshot.courses,
            snapshot.now,
            config.max_candidates,
        )
    }
}

struct BehavioralScorer;

impl Scorer for BehavioralScorer {
    fn kind(&self) -> SourceKind {
        SourceKind::Behavioral
    }

    fn run(&self, snapshot: &Snapshot, config: &EngineConfig) -> Vec<ScoredCandidate> {
        scorers::behavioral::score(&snapshot.profile, &snapshot.courses, config.max_candidates)
    }
}

fn default_scorers() -> Vec<Arc<dyn Scorer>> {
    vec![
        Arc::new(CollaborativeScorer),
        Arc::new(ContentScorer),
        Arc::new(MarketScorer),
        Arc::new(BehavioralScorer),
    ]
}

/// Hybrid recommendation engine over pluggable stores.
///
/// Each request loads a fresh snapshot, fans the four scorers out on
/// blocking threads, and runs the combined candidates through the
/// diversity and completed-course filters before enrichment.
pub struct RecommendationEngine {
    users: Arc<dyn UserStore>,
    courses: Arc<dyn CourseStore>,
    market: Arc<dyn MarketDataProvider>,
    cache: Option<Arc<dyn Cache>>,
    config: EngineConfig,
    scorers: Vec<Arc<dyn Scorer>>,
}

impl RecommendationEngine {
    /// Engine over the given stores with default configuration and no
    /// cache.
    pub fn new(
        users: Arc<dyn UserStore>,
        courses: Arc<dyn CourseStore>,
        market: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            users,
            courses,
            market,
            cache: None,
            config: EngineConfig::default(),
            scorers: default_scorers(),
        }
    }

    #[cfg(test)]
    fn with_scorers(mut self, scorers: Vec<Arc<dyn Scorer>>) -> Self {
        self.scorers = scorers;
        self
    }

    /// Attach an advisory cache.
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Produce ranked recommendations for one user.
    ///
    /// Fails only when the user is unknown or a required store is
    /// unreachable; scorer failures and market-data outages degrade to
    /// partial results.
    pub async fn recommend(
        &self,
        user_id: &str,
        options: RecommendOptions,
    ) -> Result<Vec<Recommendation>> {
        let limit = options.limit.unwrap_or(self.config.default_limit);
        let diversity_factor = options
            .diversity_factor
            .unwrap_or(self.config.diversity_factor);
        let cache_key = format!("recommendations:{user_id}:{limit}:{diversity_factor}");

        if let Some(hit) = self.cached(&cache_key).await {
            debug!(user_id, "serving recommendations from cache");
            return Ok(hit);
        }

        let snapshot = Arc::new(self.load_snapshot(user_id).await?);
        let sources = self.run_scorers(Arc::clone(&snapshot)).await;

        let merged = merge(sources);
        let courses_by_id: HashMap<&str, &Course> = snapshot
            .courses
            .iter()
            .map(|c| (c.id.as_str(), c))
            .collect();
        let diverse = diversity_filter(merged, diversity_factor, &courses_by_id);
        let mut fresh = completed_filter(diverse, &snapshot.profile);
        fresh.truncate(limit);

        let recommendations = enrich(fresh, &courses_by_id);
        debug!(
            user_id,
            count = recommendations.len(),
            "recommendations ready"
        );

        self.store_cached(&cache_key, &recommendations).await;
        Ok(recommendations)
    }

    /// Load everything a request needs into one immutable snapshot.
    ///
    /// User and course data are required; market trends degrade to an
    /// empty snapshot on failure.
    async fn load_snapshot(&self, user_id: &str) -> Result<Snapshot> {
        let profile = self
            .users
            .get(user_id)
            .await
            .map_err(|e| store_unavailable("users", e))?
            .ok_or_else(|| EngineError::UserNotFound {
                user_id: user_id.to_string(),
            })?;
        let users = self
            .users
            .list_all()
            .await
            .map_err(|e| store_unavailable("users", e))?;
        let courses = self
            .courses
            .list_all()
            .await
            .map_err(|e| store_unavailable("courses", e))?;
        let trends = match self.market.trends().await {
            Ok(trends) => trends,
            Err(error) => {
                warn!(%error, "market data unavailable, scoring without trends");
                MarketTrends::default()
            }
        };

        Ok(Snapshot {
            profile,
            users,
            courses,
            trends,
            now: Utc::now(),
        })
    }

    /// Fan the scorers out on blocking threads and collect their
    /// weighted outputs. A panicked or cancelled scorer contributes an
    /// empty list.
    async fn run_scorers(&self, snapshot: Arc<Snapshot>) -> Vec<WeightedSource> {
        let handles: Vec<_> = self
            .scorers
            .iter()
            .map(|scorer| {
                let scorer = Arc::clone(scorer);
                let snapshot = Arc::clone(&snapshot);
                let config = self.config.clone();
                (
                    scorer.kind(),
                    tokio::task::spawn_blocking(move || scorer.run(&snapshot, &config)),
                )
            })
            .collect();

        let mut sources = Vec::with_capacity(handles.len());
        for (kind, handle) in handles {
            let candidates: Vec<ScoredCandidate> = match handle.await {
                Ok(candidates) => candidates,
                Err(error) => {
                    warn!(%error, source = kind.label(), "scorer failed, continuing without it");
                    Vec::new()
                }
            };
            sources.push(WeightedSource {
                kind,
                weight: self.config.weights.weight_for(kind),
                candidates,
            });
        }
        sources
    }

    async fn cached(&self, key: &str) -> Option<Vec<Recommendation>> {
        let cache = self.cache.as_ref()?;
        let value = cache.get(key).await?;
        match serde_json::from_value(value) {
            Ok(recommendations) => Some(recommendations),
            Err(error) => {
                warn!(%error, key, "discarding undecodable cache entry");
                None
            }
        }
    }

    async fn store_cached(&self, key: &str, recommendations: &[Recommendation]) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        match serde_json::to_value(recommendations) {
            Ok(value) => {
                let ttl = Duration::from_secs(self.config.cache_ttl_secs);
                cache.set(key, value, ttl).await;
            }
            Err(error) => warn!(%error, key, "failed to serialize recommendations for cache"),
        }
    }
}

fn store_unavailable(store: &'static str, error: anyhow::Error) -> EngineError {
    EngineError::StoreUnavailable {
        store,
        message: error.to_string(),
    }
}
