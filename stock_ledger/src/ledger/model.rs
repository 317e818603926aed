use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Serialize, Deserialize, Debug)]
pub struct BuyOrder {
    pub ticker: String,
    pub price: Decimal,
    pub quantity: i32,
    pub date: NaiveDate,
}

impl BuyOrder {
    pub fn cost(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A sell targets one specific lot by `price_id`; the engine does no
/// FIFO/LIFO selection.
#[derive(Serialize, Deserialize, Debug)]
pub struct SellOrder {
    pub stock_id: i32,
    pub price_id: i32,
    pub price: Decimal,
    pub quantity: i32,
    pub date: NaiveDate,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl TryFrom<&str> for TradeSide {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        match value {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            _ => Err(anyhow::anyhow!("Unknown transaction type")),
        }
    }
}

/// A sell may only draw down what the lot still holds.
pub fn deduct(available: i32, requested: i32) -> Result<i32, ServiceError> {
    if requested > available {
        return Err(ServiceError::Oversold {
            available,
            requested,
        });
    }
    Ok(available - requested)
}

/// Append-only audit row, returned as-is in the dashboard activity feed.
#[derive(Serialize, Deserialize, Debug, sqlx::FromRow)]
pub struct Activity {
    pub transaction_id: i32,
    pub user_id: i32,
    pub stock_id: i32,
    pub transaction_type: String,
    pub quantity: i32,
    pub price: Decimal,
    pub transaction_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn cost_is_quantity_times_price() {
        let order = BuyOrder {
            ticker: "AAPL".to_string(),
            price: dec!(150.25),
            quantity: 4,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert_eq!(order.cost(), dec!(601.00));
    }

    #[test]
    fn deduct_leaves_the_remainder() {
        assert_eq!(deduct(10, 4).unwrap(), 6);
        assert_eq!(deduct(10, 10).unwrap(), 0);
    }

    #[test]
    fn deduct_rejects_overselling() {
        let err = deduct(3, 10).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Oversold {
                available: 3,
                requested: 10
            }
        ));
    }

    #[test]
    fn trade_side_round_trips() {
        assert_eq!(TradeSide::try_from("buy").unwrap(), TradeSide::Buy);
        assert_eq!(TradeSide::try_from("sell").unwrap(), TradeSide::Sell);
        assert_eq!(TradeSide::Buy.as_str(), "buy");
        assert_eq!(TradeSide::Sell.as_str(), "sell");
        assert!(TradeSide::try_from("hold").is_err());
    }

    #[test]
    fn buy_order_parses_from_json() {
        let order: BuyOrder = serde_json::from_str(
            r#"{"ticker":"AAPL","price":150.25,"quantity":4,"date":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(order.ticker, "AAPL");
        assert_eq!(order.quantity, 4);
    }
}
