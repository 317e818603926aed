use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use super::model::{Stock, StockPrice};

/// Catalog statements take a connection instead of the pool so they can
/// run inside the ledger's trade transaction.
pub struct StockRepo {}

impl StockRepo {
    pub async fn get_by_ticker(
        conn: &mut PgConnection,
        ticker: &str,
    ) -> Result<Option<Stock>, sqlx::Error> {
        sqlx::query_as::<_, Stock>(
            r#"SELECT stock_id, ticker, company_name FROM stocks WHERE ticker = $1"#,
        )
        .bind(ticker)
        .fetch_optional(conn)
        .await
    }

    /// First trade of a ticker registers it. The ticker doubles as the
    /// company name until a real name source exists.
    pub async fn create(conn: &mut PgConnection, ticker: &str) -> Result<Stock, sqlx::Error> {
        sqlx::query_as::<_, Stock>(
            r#"INSERT INTO stocks (ticker, company_name)
               VALUES ($1, $1)
               RETURNING stock_id, ticker, company_name"#,
        )
        .bind(ticker)
        .fetch_one(conn)
        .await
    }

    pub async fn add_price(
        conn: &mut PgConnection,
        stock_id: i32,
        price: Decimal,
        price_date: NaiveDate,
    ) -> Result<StockPrice, sqlx::Error> {
        sqlx::query_as::<_, StockPrice>(
            r#"INSERT INTO stock_prices (stock_id, price, price_date)
               VALUES ($1, $2, $3)
               RETURNING price_id, stock_id, price, price_date"#,
        )
        .bind(stock_id)
        .bind(price)
        .bind(price_date)
        .fetch_one(conn)
        .await
    }
}
