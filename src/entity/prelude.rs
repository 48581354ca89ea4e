pub use super::menu_item::Entity as MenuItem;
pub use super::order::Entity as Order;
pub use super::restaurant::Entity as Restaurant;
