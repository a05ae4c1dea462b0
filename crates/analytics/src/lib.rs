//! # Suburb Scout Analytics Engine
//!
//! Quantitative analysis of a suburb's property listings: descriptive
//! statistics, Tukey price outliers and the investment score.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no knowledge of external systems. It depends
//!   only on `core-types`.
//! - **Stateless calculation:** every call recomputes from its inputs. The
//!   reference time is a parameter, so identical inputs give identical output.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: runs a full analysis and produces a `MarketReport`.
//! - `statistics`, `outliers`, `scoring`: the individual calculations.

pub mod engine;
pub mod outliers;
pub mod report;
pub mod scoring;
pub mod statistics;

pub use engine::{AnalyticsEngine, EngineOptions};
pub use outliers::{detect_outliers, detect_price_outliers, OutlierFlag, OutlierReport};
pub use report::MarketReport;
pub use scoring::{
    rank_by_score, score_property, top_picks, InvestmentScore, ScoreBreakdown, ScoredProperty,
    ScoringContext,
};
pub use statistics::{Measure, SampleStatistics};
