//! Demo catalog: eight restaurants selling biryani, one order aggregate per dish.

use dish_search::entity::{menu_item, order, restaurant};
use rust_decimal::Decimal;
use sea_orm_migration::sea_orm::{
    ActiveModelTrait, DbErr, EntityTrait, Set, TransactionSession, TransactionTrait,
};

const RESTAURANTS: &[(&str, &str)] = &[
    ("Hyderabadi Spice House", "Hyderabad"),
    ("Mumbai Masala Kitchen", "Mumbai"),
    ("Delhi Delights", "Delhi"),
    ("Kolkata Biryani Palace", "Kolkata"),
    ("Chennai Flavors", "Chennai"),
    ("Bangalore Spice Corner", "Bangalore"),
    ("Lucknow Kebab House", "Lucknow"),
    ("Jaipur Royal Cuisine", "Jaipur"),
];

/// (restaurant, dish, price, orders)
const MENU: &[(&str, &str, i64, i32)] = &[
    ("Hyderabadi Spice House", "Chicken Biryani", 220, 96),
    ("Hyderabadi Spice House", "Mutton Biryani", 280, 78),
    ("Hyderabadi Spice House", "Vegetable Biryani", 180, 45),
    ("Hyderabadi Spice House", "Biryani Combo", 350, 62),
    ("Mumbai Masala Kitchen", "Chicken Biryani", 200, 84),
    ("Mumbai Masala Kitchen", "Vegetable Biryani", 160, 52),
    ("Mumbai Masala Kitchen", "Egg Biryani", 170, 38),
    ("Mumbai Masala Kitchen", "Paneer Biryani", 190, 41),
    ("Delhi Delights", "Chicken Biryani", 210, 71),
    ("Delhi Delights", "Mutton Biryani", 270, 65),
    ("Delhi Delights", "Vegetable Biryani", 150, 48),
    ("Delhi Delights", "Fish Biryani", 290, 55),
    ("Kolkata Biryani Palace", "Chicken Biryani", 195, 89),
    ("Kolkata Biryani Palace", "Mutton Biryani", 260, 76),
    ("Kolkata Biryani Palace", "Vegetable Biryani", 140, 60),
    ("Kolkata Biryani Palace", "Prawn Biryani", 310, 51),
    ("Chennai Flavors", "Chicken Biryani", 230, 73),
    ("Chennai Flavors", "Vegetable Biryani", 170, 44),
    ("Chennai Flavors", "Fish Biryani", 280, 58),
    ("Bangalore Spice Corner", "Chicken Biryani", 215, 79),
    ("Bangalore Spice Corner", "Vegetable Biryani", 165, 50),
    ("Bangalore Spice Corner", "Mutton Biryani", 275, 68),
    ("Lucknow Kebab House", "Chicken Biryani", 225, 82),
    ("Lucknow Kebab House", "Mutton Biryani", 285, 70),
    ("Lucknow Kebab House", "Vegetable Biryani", 155, 46),
    ("Jaipur Royal Cuisine", "Chicken Biryani", 240, 88),
    ("Jaipur Royal Cuisine", "Vegetable Biryani", 175, 54),
    ("Jaipur Royal Cuisine", "Mutton Biryani", 295, 72),
];

/// Rows written by [`seed_catalog`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub menu_items: usize,
    pub orders: usize,
}

/// Replace the whole catalog with the demo data set.
///
/// Runs in one transaction: on error nothing is committed and the previous
/// catalog is left as it was.
pub async fn seed_catalog<C>(db: &C) -> Result<SeedSummary, DbErr>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    order::Entity::delete_many().exec(&txn).await?;
    menu_item::Entity::delete_many().exec(&txn).await?;
    restaurant::Entity::delete_many().exec(&txn).await?;

    let mut summary = SeedSummary::default();
    let mut restaurant_ids = Vec::with_capacity(RESTAURANTS.len());

    for (name, city) in RESTAURANTS {
        let model = restaurant::ActiveModel {
            name: Set((*name).to_owned()),
            city: Set((*city).to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        restaurant_ids.push((*name, model.id));
        summary.restaurants += 1;
    }

    for (restaurant_name, dish, price, orders) in MENU {
        let restaurant_id = restaurant_ids
            .iter()
            .find(|(name, _)| name == restaurant_name)
            .map(|(_, id)| *id)
            .ok_or_else(|| DbErr::Custom(format!("Unknown restaurant {restaurant_name}")))?;

        let item = menu_item::ActiveModel {
            restaurant_id: Set(restaurant_id),
            name: Set((*dish).to_owned()),
            price: Set(Decimal::from(*price)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        summary.menu_items += 1;

        order::ActiveModel {
            menu_item_id: Set(item.id),
            restaurant_id: Set(restaurant_id),
            order_count: Set(*orders),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        summary.orders += 1;
    }

    txn.commit().await?;

    tracing::info!(
        restaurants = summary.restaurants,
        menu_items = summary.menu_items,
        orders = summary.orders,
        "seeded demo catalog"
    );

    Ok(summary)
}
