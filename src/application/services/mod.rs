//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`AddressResolver`]: picks the address a cart is rated against
//! - [`MethodSelector`]: fetches, ranks and applies candidate methods
//! - [`MethodRankingStrategy`]: strategies behind each [`RankingPolicy`]
//! - [`MethodCache`]: request-scoped memo of quote provider answers

pub mod address_resolution;
pub mod method_cache;
pub mod method_selection;
pub mod ranking_strategy;

pub use address_resolution::{AddressResolver, AddressSource};
pub use method_cache::MethodCache;
pub use method_selection::{MethodSelector, SELECTOR_ORIGIN, SelectionOutcome};
pub use ranking_strategy::{
    HighestPriceStrategy, KeepExistingOrLowestStrategy, LowestPriceStrategy,
    MethodRankingStrategy, RankedMethod, RankingPolicy,
};
