//! Catalog tables: restaurants, the dishes they sell, and how often each
//! dish has been ordered.
//!
//! Deleting a restaurant cascades to its menu items and order aggregates;
//! deleting a menu item cascades to its order aggregates.

pub mod prelude;

pub mod menu_item;
pub mod order;
pub mod restaurant;
