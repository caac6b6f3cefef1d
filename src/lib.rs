//! Composable transforms and declarative derived fields
//!
//! This crate lets application code declare fields whose values are derived
//! from other fields ("this equals A if C else B", "the first participant
//! whose id is 1494", "these five words joined with spaces") instead of
//! writing observer code by hand.
//!
//! - [`composable`]: stateless, curried transforms and right-to-left
//!   composition
//! - [`computable`]: factories producing [`Descriptor`]s bound to named
//!   source fields
//! - [`store`]: an observable key-value [`Store`] that installs descriptors,
//!   caches their values and invalidates them when dependencies change

pub mod collection;
pub mod composable;
pub mod computable;
pub mod config;
pub mod errors;
pub mod store;
pub mod value;

// Re-export commonly used types
pub use collection::Collection;
pub use composable::{Context, Func};
pub use computable::Descriptor;
pub use config::StoreConfig;
pub use errors::{ComputableError, ComputableResult};
pub use store::{Store, StoreBuilder, SubscriptionId};
pub use value::Value;
