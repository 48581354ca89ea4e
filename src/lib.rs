#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # Dish Search
//!
//! Find the restaurants that serve a dish within a price band, ranked by how
//! often that dish has been ordered.
//!
//! A search runs in three steps:
//!
//! 1. [`DishQuery::normalize`] validates the raw `name`, `minPrice` and
//!    `maxPrice` parameters.
//! 2. A [`CatalogStore`] streams every matching menu item together with its
//!    summed order count. [`DbCatalog`] does this with one SQL query through
//!    SeaORM.
//! 3. [`Ranker::rank`] orders the rows by popularity and keeps the top N.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use dish_search::{DbCatalog, Ranker};
//!
//! let db = sea_orm::Database::connect("postgres://localhost/restaurant_db").await?;
//! let ranker = Ranker::new(DbCatalog::new(db));
//!
//! for result in ranker.search(Some("biryani"), Some("150"), Some("300")).await? {
//!     println!("{} ({}): {} orders", result.restaurant_name, result.city, result.order_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod entity;
mod error;
mod query;
mod ranking;
mod store;

pub use error::*;
pub use query::*;
pub use ranking::*;
pub use store::*;
