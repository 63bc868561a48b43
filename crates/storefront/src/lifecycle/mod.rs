//! # Lifecycle
//!
//! [`StorefrontSystem`] starts the two actors (response cache and search history),
//! wires them to the repository and hands out query engines.
//!
//! Actors stop when every client for them is dropped. Shutdown is therefore: drop the
//! engines, then call [`StorefrontSystem::shutdown`], which drops the system's own
//! clients and awaits the actor tasks.
//!
//! ```rust,no_run
//! use storefront::config::{LoadOptions, StorefrontConfig};
//! use storefront::lifecycle::StorefrontSystem;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorefrontConfig::load(LoadOptions::default())?;
//! let system = StorefrontSystem::start(&config).await?;
//! {
//!     let mut engine = system.query_engine();
//!     engine.open().await?;
//!     engine.set_query("backpack").await?;
//!     println!("{}", engine.view().heading);
//! }
//! system.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod system;
pub mod tracing;

pub use self::system::{StorefrontSystem, SystemError};
pub use self::tracing::setup_tracing;
