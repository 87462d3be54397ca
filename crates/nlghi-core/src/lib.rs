//! nlghi-core
//!
//! Pure domain types for the Geriatric Health Index. The fixed clinical
//! domain registry, impairment levels, and the persisted patient data
//! model. No I/O; the shared vocabulary of the NLGHI crates.

pub mod domains;
pub mod error;
pub mod levels;
pub mod models;
pub mod time;

pub use domains::{DOMAIN_COUNT, DOMAIN_NAMES, DOMAIN_WEIGHTS, Domain, all_domains, get_domain};
pub use error::CoreError;
pub use levels::ImpairmentLevel;
