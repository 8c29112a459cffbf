//! Data models for orders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::money::Money;

/// A completed checkout. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    /// Globally unique order token
    #[schema(example = "8D1F0C3E6A2B4C7D9E0F1A2B3C4D5E6F")]
    pub order_number: String,
    pub user_id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub date: DateTime<Utc>,
    /// Pre-tax total
    #[schema(value_type = String, example = "18.50")]
    pub order_total: Money,
    /// Post-tax/shipping total; expected to be >= `order_total`
    #[schema(value_type = String, example = "19.99")]
    pub grand_total: Money,
}

impl Order {
    /// `grand_total - order_total`.
    ///
    /// Not floored at zero: an order stored with `grand_total < order_total`
    /// reports a negative tax instead of hiding the inconsistency.
    pub fn tax(&self) -> Money {
        self.grand_total - self.order_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order(order_total: Money, grand_total: Money) -> Order {
        Order {
            order_number: "A1".to_string(),
            user_id: None,
            full_name: "Test Buyer".to_string(),
            email: "buyer@example.com".to_string(),
            date: Utc::now(),
            order_total,
            grand_total,
        }
    }

    #[test]
    fn test_tax_is_difference() {
        let o = order(Decimal::new(1850, 2), Decimal::new(1999, 2));
        assert_eq!(o.tax(), Decimal::new(149, 2));
    }

    #[test]
    fn test_tax_zero_when_totals_equal() {
        let o = order(Decimal::new(500, 2), Decimal::new(500, 2));
        assert_eq!(o.tax(), Decimal::ZERO);
    }

    #[test]
    fn test_tax_not_clamped_when_inconsistent() {
        let o = order(Decimal::new(2000, 2), Decimal::new(1999, 2));
        assert_eq!(o.tax(), Decimal::new(-1, 2));
    }
}
