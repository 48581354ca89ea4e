use crate::{CatalogRow, CatalogStore, DishQuery, SearchError};
use futures_util::TryStreamExt;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::cmp::Reverse;
use std::num::NonZeroUsize;
use tracing::{debug, instrument, warn};

/// How many restaurants a search returns unless configured otherwise
pub const DEFAULT_TOP_N: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// One restaurant, its matching dish, and how often that dish was ordered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub city: String,
    pub dish_name: String,
    /// Always carries exactly two fractional digits
    pub dish_price: Decimal,
    pub order_count: u64,
}

impl From<CatalogRow> for RankedResult {
    fn from(row: CatalogRow) -> Self {
        let mut dish_price = row
            .dish_price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        dish_price.rescale(2);
        Self {
            restaurant_id: row.restaurant_id,
            restaurant_name: row.restaurant_name,
            city: row.city,
            dish_name: row.dish_name,
            dish_price,
            order_count: u64::try_from(row.total_order_count).unwrap_or_default(),
        }
    }
}

/// Ranks catalog matches by order volume.
///
/// Holds its store explicitly; every call to [`Ranker::rank`] is an
/// independent read, so a `Ranker` can be shared across concurrent requests.
#[derive(Clone, Debug)]
pub struct Ranker<S> {
    store: S,
    top_n: NonZeroUsize,
}

impl<S> Ranker<S>
where
    S: CatalogStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: NonZeroUsize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> NonZeroUsize {
        self.top_n
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate raw parameters, then [`rank`](Ranker::rank) them.
    ///
    /// Invalid input is rejected before the store is touched.
    pub async fn search(
        &self,
        name: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> Result<Vec<RankedResult>, SearchError> {
        let query = DishQuery::normalize(name, min_price, max_price)?;
        self.rank(&query).await
    }

    /// The most-ordered matching dishes, most popular first, at most
    /// `top_n` of them.
    ///
    /// Equal order counts are broken by restaurant id, then menu item id,
    /// both ascending. No match is an empty list, not an error.
    #[instrument(
        skip_all,
        fields(
            pattern = query.name_pattern(),
            min_price = %query.min_price(),
            max_price = %query.max_price(),
        )
    )]
    pub async fn rank(&self, query: &DishQuery) -> Result<Vec<RankedResult>, SearchError> {
        let rows = match self.store.find_matches(query).await {
            Ok(stream) => stream.try_collect::<Vec<_>>().await,
            Err(err) => Err(err),
        };
        let mut rows = rows.inspect_err(|err| warn!("catalog read failed: {err}"))?;

        let matched = rows.len();
        rows.sort_by_key(|row| {
            (
                Reverse(row.total_order_count),
                row.restaurant_id,
                row.menu_item_id,
            )
        });
        rows.truncate(self.top_n.get());
        debug!(matched, returned = rows.len(), "ranked dish matches");

        Ok(rows.into_iter().map(RankedResult::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(restaurant_id: i32, menu_item_id: i32, price: Decimal, count: i64) -> CatalogRow {
        CatalogRow {
            restaurant_id,
            restaurant_name: format!("Restaurant {restaurant_id}"),
            city: "Hyderabad".to_owned(),
            menu_item_id,
            dish_name: "Chicken Biryani".to_owned(),
            dish_price: price,
            total_order_count: count,
        }
    }

    #[test]
    fn price_has_two_fraction_digits() {
        let result = RankedResult::from(row(1, 1, dec!(220), 96));
        assert_eq!(result.dish_price.to_string(), "220.00");

        let result = RankedResult::from(row(1, 1, dec!(199.999), 96));
        assert_eq!(result.dish_price.to_string(), "200.00");

        let result = RankedResult::from(row(1, 1, dec!(0.125), 0));
        assert_eq!(result.dish_price.to_string(), "0.13");

        let result = RankedResult::from(row(1, 1, dec!(12.5), 0));
        assert_eq!(result.dish_price.to_string(), "12.50");
        assert_eq!(result.order_count, 0);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(RankedResult::from(row(7, 3, dec!(200), 84))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "restaurantId": 7,
                "restaurantName": "Restaurant 7",
                "city": "Hyderabad",
                "dishName": "Chicken Biryani",
                "dishPrice": "200.00",
                "orderCount": 84,
            })
        );
    }
}
