use sqlx::Postgres;

use super::model::HoldingRow;

#[derive(Clone)]
pub struct PortfolioRepo {
    pub pool: sqlx::Pool<Postgres>,
}

impl PortfolioRepo {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Every lot the user ever opened, joined to its stock and price
    /// observation. Lot creation order keeps the ticker grouping stable.
    pub async fn get_holdings(&self, user_id: i32) -> Result<Vec<HoldingRow>, sqlx::Error> {
        sqlx::query_as::<_, HoldingRow>(
            r#"SELECT s.ticker, s.company_name, a.stock_id, a.price_id,
                      a.quantity, p.price, p.price_date
               FROM assets a
               JOIN stocks s ON s.stock_id = a.stock_id
               JOIN stock_prices p ON p.price_id = a.price_id
               WHERE a.user_id = $1
               ORDER BY a.asset_id"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
