use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, Postgres};

use super::model::{Activity, BuyOrder, SellOrder, TradeSide, deduct};
use crate::error::ServiceError;
use crate::stock::repo::StockRepo;

#[derive(Clone)]
pub struct LedgerRepo {
    pub pool: sqlx::Pool<Postgres>,
}

impl LedgerRepo {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Five writes, one transaction: stock (lazily), price lot, asset lot,
    /// audit row, balance. A failed step rolls back the whole trade.
    pub async fn record_buy(&self, user_id: i32, order: &BuyOrder) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        let stock = match StockRepo::get_by_ticker(&mut tx, &order.ticker).await? {
            Some(stock) => stock,
            None => StockRepo::create(&mut tx, &order.ticker).await?,
        };
        let lot = StockRepo::add_price(&mut tx, stock.stock_id, order.price, order.date).await?;

        sqlx::query(
            r#"INSERT INTO assets (user_id, stock_id, price_id, quantity)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(user_id)
        .bind(stock.stock_id)
        .bind(lot.price_id)
        .bind(order.quantity)
        .execute(&mut *tx)
        .await?;

        Self::append_transaction(
            &mut tx,
            user_id,
            stock.stock_id,
            TradeSide::Buy,
            order.quantity,
            order.price,
            order.date,
        )
        .await?;

        sqlx::query(r#"UPDATE users SET total_investment = total_investment - $1 WHERE user_id = $2"#)
            .bind(order.cost())
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// The audit row goes in first; the transaction boundary means a
    /// missing lot or an oversell rolls it back rather than leaving an
    /// orphan audit entry.
    pub async fn record_sell(&self, user_id: i32, order: &SellOrder) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        Self::append_transaction(
            &mut tx,
            user_id,
            order.stock_id,
            TradeSide::Sell,
            order.quantity,
            order.price,
            order.date,
        )
        .await?;

        let row: Option<(i32,)> =
            sqlx::query_as(r#"SELECT quantity FROM assets WHERE price_id = $1"#)
                .bind(order.price_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (current,) = row.ok_or(ServiceError::LotNotFound)?;
        let remaining = deduct(current, order.quantity)?;

        sqlx::query(r#"UPDATE assets SET quantity = $1 WHERE price_id = $2"#)
            .bind(remaining)
            .bind(order.price_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn append_transaction(
        conn: &mut PgConnection,
        user_id: i32,
        stock_id: i32,
        side: TradeSide,
        quantity: i32,
        price: Decimal,
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO transactions
                   (user_id, stock_id, transaction_type, quantity, price, transaction_date)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(user_id)
        .bind(stock_id)
        .bind(side.as_str())
        .bind(quantity)
        .bind(price)
        .bind(date)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// The dashboard activity feed: every transaction the user ever made,
    /// unfiltered and unsorted.
    pub async fn activities(&self, user_id: i32) -> Result<Vec<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"SELECT transaction_id, user_id, stock_id, transaction_type,
                      quantity, price, transaction_date
               FROM transactions WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
