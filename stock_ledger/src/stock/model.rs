use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, sqlx::FromRow)]
pub struct Stock {
    pub stock_id: i32,
    pub ticker: String,
    pub company_name: String,
}

/// One price observation per buy. Lots reference exactly one of these
/// and they are never reused or updated.
#[derive(Serialize, Deserialize, Debug, sqlx::FromRow)]
pub struct StockPrice {
    pub price_id: i32,
    pub stock_id: i32,
    pub price: Decimal,
    pub price_date: NaiveDate,
}
