use crate::entity::{menu_item, order, restaurant};
use crate::DishQuery;
use async_trait::async_trait;
use futures_util::{TryStreamExt, future, stream::BoxStream};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
    sea_query::{Expr, ExprTrait, Func, LikeExpr},
};

/// One menu item that matched a search, with its summed order volume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogRow {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub city: String,
    pub menu_item_id: i32,
    pub dish_name: String,
    pub dish_price: Decimal,
    pub total_order_count: i64,
}

/// Rows produced by [`CatalogStore::find_matches`], read once front to back.
pub type CatalogRows<'a> = BoxStream<'a, Result<CatalogRow, DbErr>>;

/// Read access to restaurants, their menu items and order aggregates.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every (restaurant, menu item) pair whose dish name contains the
    /// query's pattern, ignoring case, and whose price lies within the
    /// query's inclusive bounds.
    ///
    /// Each row carries the sum of all order aggregates for its menu item,
    /// zero when none exist.
    async fn find_matches<'a>(&'a self, query: &DishQuery) -> Result<CatalogRows<'a>, DbErr>;
}

/// [`CatalogStore`] backed by a SeaORM connection pool.
///
/// Rows are emitted in `(restaurant id, menu item id)` order.
///
/// `LOWER` folds only ASCII on SQLite (and under the C locale on Postgres),
/// so the SQL `LIKE` is only a coarse filter and the
/// streamed rows are checked again with [`DishQuery::matches_name`].
#[derive(Clone, Debug)]
pub struct DbCatalog {
    db: DatabaseConnection,
}

impl DbCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CatalogStore for DbCatalog {
    async fn find_matches<'a>(&'a self, query: &DishQuery) -> Result<CatalogRows<'a>, DbErr> {
        let pattern = LikeExpr::new(like_prefilter(query.name_pattern())).escape('\\');

        let select = menu_item::Entity::find()
            .select_only()
            .column_as(restaurant::Column::Id, "restaurant_id")
            .column_as(restaurant::Column::Name, "restaurant_name")
            .column_as(restaurant::Column::City, "city")
            .column_as(menu_item::Column::Id, "menu_item_id")
            .column_as(menu_item::Column::Name, "dish_name")
            .column_as(menu_item::Column::Price, "dish_price")
            .column_as(order::Column::OrderCount.sum(), "total_order_count")
            .join(JoinType::InnerJoin, menu_item::Relation::Restaurant.def())
            .join(JoinType::LeftJoin, menu_item::Relation::Order.def())
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    menu_item::Entity,
                    menu_item::Column::Name,
                ))))
                .like(pattern),
            )
            .filter(menu_item::Column::Price.between(query.min_price(), query.max_price()))
            .group_by(restaurant::Column::Id)
            .group_by(menu_item::Column::Id)
            .order_by_asc(restaurant::Column::Id)
            .order_by_asc(menu_item::Column::Id);

        let rows = select.into_model::<SumRow>().stream(&self.db).await?;
        let query = query.clone();

        Ok(Box::pin(
            rows.map_ok(CatalogRow::from)
                .try_filter(move |row| future::ready(query.matches_name(&row.dish_name))),
        ))
    }
}

/// `SUM` over an empty left join is `NULL`.
#[derive(Debug, FromQueryResult)]
struct SumRow {
    restaurant_id: i32,
    restaurant_name: String,
    city: String,
    menu_item_id: i32,
    dish_name: String,
    dish_price: Decimal,
    total_order_count: Option<i64>,
}

impl From<SumRow> for CatalogRow {
    fn from(row: SumRow) -> Self {
        Self {
            restaurant_id: row.restaurant_id,
            restaurant_name: row.restaurant_name,
            city: row.city,
            menu_item_id: row.menu_item_id,
            dish_name: row.dish_name,
            dish_price: row.dish_price,
            total_order_count: row.total_order_count.unwrap_or_default(),
        }
    }
}

/// `LIKE` pattern matching every name whose Unicode lowercase contains the
/// lowercased fragment, given a backend whose `LOWER` may fold only ASCII.
///
/// ASCII characters are kept (escaped). Anything else becomes `%`, as do `i`
/// and `k`, which `İ` and the Kelvin sign lower to.
fn like_prefilter(fragment: &str) -> String {
    let mut pattern = String::from("%");
    let mut wildcard = true;
    for c in fragment.to_lowercase().chars() {
        if !c.is_ascii() || matches!(c, 'i' | 'k') {
            if !wildcard {
                pattern.push('%');
                wildcard = true;
            }
            continue;
        }
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
        wildcard = false;
    }
    if !wildcard {
        pattern.push('%');
    }
    pattern
}
