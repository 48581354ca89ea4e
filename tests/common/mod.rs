#![allow(dead_code)]

use dish_search::entity::{menu_item, order, restaurant};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn insert_restaurant(db: &DatabaseConnection, name: &str, city: &str) -> restaurant::Model {
    restaurant::ActiveModel {
        name: Set(name.to_owned()),
        city: Set(city.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert restaurant")
}

pub async fn insert_menu_item(
    db: &DatabaseConnection,
    restaurant: &restaurant::Model,
    name: &str,
    price: Decimal,
) -> menu_item::Model {
    menu_item::ActiveModel {
        restaurant_id: Set(restaurant.id),
        name: Set(name.to_owned()),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert menu item")
}

pub async fn insert_orders(db: &DatabaseConnection, item: &menu_item::Model, count: i32) -> order::Model {
    order::ActiveModel {
        menu_item_id: Set(item.id),
        restaurant_id: Set(item.restaurant_id),
        order_count: Set(count),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert order aggregate")
}

/// A dish with a single order aggregate
pub async fn insert_dish(
    db: &DatabaseConnection,
    restaurant: &restaurant::Model,
    name: &str,
    price: Decimal,
    orders: i32,
) -> menu_item::Model {
    let item = insert_menu_item(db, restaurant, name, price).await;
    insert_orders(db, &item, orders).await;
    item
}
