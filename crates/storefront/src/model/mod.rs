//! Pure data structures for what the catalog service returns.

pub mod category;
pub mod product;

pub use category::*;
pub use product::*;
