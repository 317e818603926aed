use sqlx::Postgres;

use super::model::User;

#[derive(Clone)]
pub struct UserRepo {
    pub pool: sqlx::Pool<Postgres>,
}

impl UserRepo {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Uniqueness of `username` is enforced by the store constraint; a
    /// violation surfaces as a plain sqlx error.
    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<(i32, String), sqlx::Error> {
        let row: (i32, String) = sqlx::query_as(
            r#"INSERT INTO users (username, password_hash, email)
               VALUES ($1, $2, $3)
               RETURNING user_id, username"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT user_id, username, password_hash, email,
                      total_investment, total_profit_loss, created_at
               FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT user_id, username, password_hash, email,
                      total_investment, total_profit_loss, created_at
               FROM users WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}
