//! # `MnemeDB` Core
//!
//! Tiered in-memory context store engine for AI agents, written in Rust.
//!
//! `MnemeDB` keeps an agent's working context in four tier-tagged stores
//! (immediate, episodic, semantic, temporal), ranks items across all tiers
//! against a query with a composite relevance score, and periodically decays
//! and archives items that have gone stale.
//!
//! ## Features
//!
//! - **Tiered Stores**: one arena per tier, access-tracking reads
//! - **Composite Scoring**: weighted similarity + recency + importance
//! - **Lifecycle Maintenance**: exponential decay, consolidation, archival
//! - **Shared Context**: cross-agent blackboard for high-relevance items
//! - **Zero I/O**: single-process, in-memory; embedding and persistence are
//!   the surrounding application's collaborators
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mnemedb_core::{
//!     broadcast_above, LifecycleConfig, LifecycleManager, MemoryItem, MnemeConfig,
//!     RetrievalEngine, SharedContext, Tier, TieredMemory,
//! };
//!
//! let config = MnemeConfig::load()?;
//! config.validate()?;
//!
//! let memory = TieredMemory::new();
//! memory.insert(
//!     MemoryItem::new("fact-1", "The API uses JWT for auth", Tier::Semantic)
//!         .with_importance(0.9)
//!         .with_embedding(vec![0.1, 0.2, 0.9]),
//! );
//! memory.temporal().record_metric_now("cpu_usage", 0.72);
//!
//! // Rank everything against a query vector
//! let engine = RetrievalEngine::new(config.scoring.clone());
//! let results = engine.retrieve("auth details", &[0.1, 0.2, 0.9], &memory.stores(), 5);
//!
//! // Surface the best results to other agents; the threshold is ours, not
//! // the engine's
//! let sink = SharedContext::new();
//! broadcast_above(&sink, &results, config.retrieval.broadcast_threshold);
//!
//! // Decay and archive on whatever schedule the application owns
//! let lifecycle = LifecycleManager::new(config.lifecycle.clone());
//! let report = lifecycle.decay_and_maintain(&memory.stores());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // Acceptable for f32/f64 conversions
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_self)]

pub mod config;
pub mod error;
pub mod item;
pub mod lifecycle;
pub mod memory;
pub mod retrieval;
#[cfg(test)]
mod retrieval_tests;
pub mod scoring;
pub mod shared;
pub mod similarity;
#[cfg(test)]
mod similarity_tests;
pub mod store;

pub use config::{ConfigError, LoggingConfig, MnemeConfig, RetrievalConfig};
pub use error::{Error, Result};
pub use item::{now_secs, MemoryItem, MemoryStatus, Tier};
pub use lifecycle::{LifecycleConfig, LifecycleManager, MaintenanceReport};
pub use memory::TieredMemory;
pub use retrieval::{RetrievalEngine, ScoredItem};
pub use scoring::{ScoringConfig, NEUTRAL_SIMILARITY};
pub use shared::{broadcast_above, SharedContext};
pub use similarity::SimilarityMetric;
pub use store::{MemoryStore, TemporalStore};
