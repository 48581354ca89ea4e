pub use sea_orm_migration::prelude::*;

mod m20241019_000001_create_restaurants_table;
mod m20241019_000002_create_menu_items_table;
mod m20241019_000003_create_orders_table;
pub mod seed;

pub use seed::{SeedSummary, seed_catalog};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241019_000001_create_restaurants_table::Migration),
            Box::new(m20241019_000002_create_menu_items_table::Migration),
            Box::new(m20241019_000003_create_orders_table::Migration),
        ]
    }
}
