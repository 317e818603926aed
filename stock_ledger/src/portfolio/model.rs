use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::model::Activity;
use crate::user::model::User;

/// One asset lot joined to its stock and price observation, in lot
/// creation order.
#[derive(Debug, sqlx::FromRow)]
pub struct HoldingRow {
    pub ticker: String,
    pub company_name: String,
    pub stock_id: i32,
    pub price_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub price_date: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LotView {
    pub price_id: i32,
    pub price: Decimal,
    pub stock_id: i32,
    pub quantity: i32,
    pub date: NaiveDate,
    pub company_name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TickerGroup {
    pub ticker: String,
    pub assets: Vec<LotView>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Balance {
    pub total_investment: Decimal,
    pub total_profit_loss: Decimal,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Joined {
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardView {
    #[serde(rename = "transformedAssets")]
    pub transformed_assets: Vec<TickerGroup>,
    pub activities: Vec<Activity>,
    pub balance: Balance,
    pub joined: Joined,
}

impl DashboardView {
    pub fn build(user: &User, holdings: Vec<HoldingRow>, activities: Vec<Activity>) -> Self {
        Self {
            transformed_assets: group_by_ticker(holdings),
            activities,
            balance: Balance {
                total_investment: user.total_investment,
                total_profit_loss: user.total_profit_loss,
            },
            joined: Joined {
                created_at: user.created_at,
            },
        }
    }
}

/// Groups lots under their ticker, keeping tickers in first-appearance
/// order. Emptied lots stay visible; lot rows are never deleted.
pub fn group_by_ticker(rows: Vec<HoldingRow>) -> Vec<TickerGroup> {
    let mut groups: Vec<TickerGroup> = Vec::new();
    for row in rows {
        let lot = LotView {
            price_id: row.price_id,
            price: row.price,
            stock_id: row.stock_id,
            quantity: row.quantity,
            date: row.price_date,
            company_name: row.company_name,
        };
        match groups.iter().position(|g| g.ticker == row.ticker) {
            Some(idx) => groups[idx].assets.push(lot),
            None => groups.push(TickerGroup {
                ticker: row.ticker,
                assets: vec![lot],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn holding(ticker: &str, price_id: i32, price: Decimal, quantity: i32) -> HoldingRow {
        HoldingRow {
            ticker: ticker.to_string(),
            company_name: ticker.to_string(),
            stock_id: 1,
            price_id,
            quantity,
            price,
            price_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn two_buys_of_one_ticker_share_a_group() {
        let groups = group_by_ticker(vec![
            holding("AAPL", 1, dec!(150), 4),
            holding("AAPL", 2, dec!(160), 2),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].ticker, "AAPL");
        assert_eq!(groups[0].assets.len(), 2);
        assert_ne!(groups[0].assets[0].price_id, groups[0].assets[1].price_id);
    }

    #[test]
    fn ticker_order_follows_first_appearance() {
        let groups = group_by_ticker(vec![
            holding("MSFT", 1, dec!(400), 1),
            holding("AAPL", 2, dec!(150), 1),
            holding("MSFT", 3, dec!(410), 1),
        ]);
        let tickers: Vec<&str> = groups.iter().map(|g| g.ticker.as_str()).collect();
        assert_eq!(tickers, ["MSFT", "AAPL"]);
        assert_eq!(groups[0].assets.len(), 2);
    }

    #[test]
    fn emptied_lots_are_not_filtered() {
        let groups = group_by_ticker(vec![holding("AAPL", 1, dec!(150), 0)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].assets[0].quantity, 0);
    }

    #[test]
    fn no_holdings_is_an_empty_view() {
        assert!(group_by_ticker(Vec::new()).is_empty());
    }

    #[test]
    fn dashboard_serializes_with_client_field_names() {
        let view = DashboardView {
            transformed_assets: Vec::new(),
            activities: Vec::new(),
            balance: Balance {
                total_investment: dec!(1000),
                total_profit_loss: dec!(0),
            },
            joined: Joined {
                created_at: Utc::now(),
            },
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"transformedAssets\""));
        assert!(json.contains("\"activities\""));
        assert!(json.contains("\"balance\""));
        assert!(json.contains("\"joined\""));
    }
}
