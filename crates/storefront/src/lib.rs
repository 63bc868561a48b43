//! # Storefront
//!
//! A client for a fakestoreapi-shaped product catalog: browsing, category filters,
//! free-text search with sorting, and a persisted search history.
//!
//! ## Components
//!
//! - **[model]**: Products and the closed set of categories.
//! - **[catalog]**: The [`ProductRepository`](catalog::ProductRepository) seam, its
//!   HTTP implementation and a scripted mock.
//! - **[cache]**: A response cache actor in front of any repository.
//! - **[history]**: The search history actor and its key-value storage.
//! - **[query]**: Search, filter and sort, driven by the
//!   [`CatalogQueryEngine`](query::CatalogQueryEngine).
//! - **[lifecycle]**: Starting and stopping the actors, tracing setup.
//! - **[config]** and **[cli]**: Layered configuration and the `storefront` binary.
//!
//! ## Testing
//!
//! See [`catalog::mock`] for scripting repository responses, and
//! `storefront_actor::mock` for faking actor replies.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod history;
pub mod lifecycle;
pub mod model;
pub mod query;
