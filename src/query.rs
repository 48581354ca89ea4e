use crate::SearchError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A validated dish search: a name fragment and an inclusive price band.
///
/// Built only through [`DishQuery::normalize`] (or [`DishQuery::new`]), so a
/// value of this type always has a non-blank pattern and `0 <= min <= max`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DishQuery {
    name_pattern: String,
    min_price: Decimal,
    max_price: Decimal,
}

impl DishQuery {
    /// Validate raw request parameters.
    ///
    /// Parameters arrive as the strings a client sent, `None` when the
    /// parameter was omitted. Blank strings count as omitted. Prices are
    /// parsed as decimals, never through binary floating point.
    ///
    /// ```
    /// use dish_search::DishQuery;
    ///
    /// let query = DishQuery::normalize(Some(" Biryani "), Some("150"), Some("300")).unwrap();
    /// assert_eq!(query.name_pattern(), "Biryani");
    ///
    /// let err = DishQuery::normalize(Some("biryani"), Some("150"), None).unwrap_err();
    /// assert_eq!(err.kind(), "MissingField");
    /// ```
    pub fn normalize(
        name: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> Result<Self, SearchError> {
        let name =
            present(name).ok_or_else(|| SearchError::missing("Dish name (name) is required"))?;

        let (Some(min_price), Some(max_price)) = (present(min_price), present(max_price)) else {
            return Err(SearchError::missing(
                "Both minPrice and maxPrice are required",
            ));
        };

        let (Some(min_price), Some(max_price)) = (parse_price(min_price), parse_price(max_price))
        else {
            return Err(SearchError::invalid_range(
                "minPrice and maxPrice must be valid non-negative numbers",
            ));
        };

        Self::new(name, min_price, max_price)
    }

    /// Build a query from already-typed bounds, applying the same checks as
    /// [`DishQuery::normalize`].
    pub fn new(
        name_pattern: impl Into<String>,
        min_price: Decimal,
        max_price: Decimal,
    ) -> Result<Self, SearchError> {
        let name_pattern = name_pattern.into();
        let name_pattern = name_pattern.trim();
        if name_pattern.is_empty() {
            return Err(SearchError::missing("Dish name (name) is required"));
        }
        if min_price < Decimal::ZERO || max_price < Decimal::ZERO {
            return Err(SearchError::invalid_range(
                "minPrice and maxPrice must be valid non-negative numbers",
            ));
        }
        if min_price > max_price {
            return Err(SearchError::invalid_range(
                "minPrice must be less than or equal to maxPrice",
            ));
        }

        Ok(Self {
            name_pattern: name_pattern.to_owned(),
            min_price,
            max_price,
        })
    }

    /// The trimmed name fragment, matched as a case-insensitive substring
    pub fn name_pattern(&self) -> &str {
        &self.name_pattern
    }

    /// Inclusive lower price bound
    pub fn min_price(&self) -> Decimal {
        self.min_price
    }

    /// Inclusive upper price bound
    pub fn max_price(&self) -> Decimal {
        self.max_price
    }

    /// Whether `dish_name` contains the pattern, with both sides lowercased
    /// by the full Unicode mapping
    pub fn matches_name(&self, dish_name: &str) -> bool {
        dish_name
            .to_lowercase()
            .contains(&self.name_pattern.to_lowercase())
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Plain decimal notation only: no exponents, digit separators, `NaN` or `inf`.
///
/// Magnitudes beyond what [`Decimal`] holds saturate at `Decimal::MAX` (or
/// `Decimal::MIN`); no stored price can lie outside that range.
fn parse_price(raw: &str) -> Option<Decimal> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty()
        || digits == "."
        || digits.matches('.').count() > 1
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        return None;
    }
    match Decimal::from_str(raw) {
        Ok(price) => Some(price),
        Err(_) if raw.starts_with('-') => Some(Decimal::MIN),
        Err(_) => Some(Decimal::MAX),
    }
}
