//! Sales reporting

use serde::Serialize;

use crate::checkout::Order;
use crate::money::{self, Money};

/// Sum of `grand_total` over the given orders.
///
/// Screens always pass the full, unfiltered order collection so the figure
/// does not move with whatever search is applied to the screen.
pub fn compute_sales_total(orders: &[Order]) -> Money {
    money::sum(orders.iter().map(|o| o.grand_total))
}

pub fn compute_order_tax(order: &Order) -> Money {
    order.tax()
}

/// An order as shown in listings, with its tax broken out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    #[serde(flatten)]
    pub order: Order,
    pub tax: Money,
}

impl From<Order> for OrderRow {
    fn from(order: Order) -> Self {
        let tax = compute_order_tax(&order);
        Self { order, tax }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order(number: &str, order_total: Decimal, grand_total: Decimal) -> Order {
        Order {
            order_number: number.to_string(),
            user_id: Some(1),
            full_name: "Buyer".to_string(),
            email: "buyer@example.com".to_string(),
            date: Utc::now(),
            order_total,
            grand_total,
        }
    }

    #[test]
    fn test_sales_total_exact_sum() {
        let orders = vec![
            order("A", Decimal::new(1850, 2), Decimal::new(1999, 2)),
            order("B", Decimal::new(450, 2), Decimal::new(500, 2)),
        ];
        assert_eq!(compute_sales_total(&orders), Decimal::new(2499, 2));
    }

    #[test]
    fn test_sales_total_empty_is_zero() {
        assert_eq!(compute_sales_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_sales_total_many_cents_no_drift() {
        let orders: Vec<Order> = (0..1000)
            .map(|i| order(&i.to_string(), Decimal::new(1, 2), Decimal::new(1, 2)))
            .collect();
        assert_eq!(compute_sales_total(&orders), Decimal::new(1000, 2));
    }

    #[test]
    fn test_order_tax() {
        let o = order("A", Decimal::new(1850, 2), Decimal::new(1999, 2));
        assert_eq!(compute_order_tax(&o), Decimal::new(149, 2));
    }

    #[test]
    fn test_order_tax_negative_is_reported_as_is() {
        let o = order("A", Decimal::new(2000, 2), Decimal::new(1500, 2));
        assert_eq!(compute_order_tax(&o), Decimal::new(-500, 2));
    }

    #[test]
    fn test_order_row_serializes_flat_with_tax() {
        let row = OrderRow::from(order("A", Decimal::new(1850, 2), Decimal::new(1999, 2)));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["order_number"], "A");
        assert_eq!(json["tax"], "1.49");
    }
}
