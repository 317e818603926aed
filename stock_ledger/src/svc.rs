use anyhow::Result;
use request_http_parser::parser::Request;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::auth;
use crate::cfg::CONFIG;
use crate::constant::{CREATED, OK_PLAIN, OK_RESPONSE};
use crate::error::ServiceError;
use crate::ledger::model::{BuyOrder, SellOrder};
use crate::ledger::repo::LedgerRepo;
use crate::portfolio::model::DashboardView;
use crate::portfolio::repo::PortfolioRepo;
use crate::user::model::{LoginForm, RegisterForm};
use crate::user::repo::UserRepo;
use crate::utils::{self, des_from_str};

#[derive(Serialize, Deserialize, Debug)]
struct RegisterView {
    message: String,
    username: String,
    user_id: i32,
}

#[derive(Serialize, Deserialize, Debug)]
struct LoginView {
    token: String,
    username: String,
    id: i32,
}

pub struct Service {
    user_repo: UserRepo,
    ledger_repo: LedgerRepo,
    portfolio_repo: PortfolioRepo,
    http: reqwest::Client,
}

fn parse_body<T>(body: Option<&str>) -> Result<T, ServiceError>
where
    T: for<'a> Deserialize<'a> + Serialize,
{
    des_from_str(body.unwrap_or_default()).map_err(ServiceError::BadRequest)
}

impl Service {
    pub fn new(user_repo: UserRepo, ledger_repo: LedgerRepo, portfolio_repo: PortfolioRepo) -> Self {
        Self {
            user_repo,
            ledger_repo,
            portfolio_repo,
            http: reqwest::Client::new(),
        }
    }

    pub async fn liveness<W>(&self, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer
            .write_all(format!("{}{}", OK_PLAIN, "Hello World").as_bytes())
            .await?;
        Ok(())
    }

    pub async fn register<W>(&self, request: &Request, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self.do_register(request.body.as_deref()).await {
            Ok(view) => utils::write_json(writer, CREATED, &view).await,
            Err(e) => utils::write_error(writer, &e).await,
        }
    }

    async fn do_register(&self, body: Option<&str>) -> Result<RegisterView, ServiceError> {
        let form: RegisterForm = parse_body(body)?;
        let password_hash = auth::hash_password(&form.password)?;
        let (user_id, username) = self
            .user_repo
            .insert(&form.username, &password_hash, &form.email)
            .await?;
        Ok(RegisterView {
            message: "User Registered Successfully".to_string(),
            username,
            user_id,
        })
    }

    pub async fn login<W>(&self, request: &Request, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self.do_login(request.body.as_deref()).await {
            Ok(view) => utils::write_json(writer, OK_RESPONSE, &view).await,
            Err(e) => utils::write_error(writer, &e).await,
        }
    }

    async fn do_login(&self, body: Option<&str>) -> Result<LoginView, ServiceError> {
        let form: LoginForm = parse_body(body)?;
        // An unknown username and a wrong password come out identical.
        let user = self
            .user_repo
            .get_by_username(&form.username)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;
        auth::verify_password(&form.password, &user.password_hash)?;
        let token = auth_token::jwt::sign_jwt(
            user.user_id,
            &user.username,
            &CONFIG.jwt_secret,
            CONFIG.token_ttl_secs,
        )?;
        Ok(LoginView {
            token,
            username: user.username,
            id: user.user_id,
        })
    }

    pub async fn recommend<W>(&self, request: &Request, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let payload = request.body.clone().unwrap_or_default();
        match self.forward(payload).await {
            Ok((head, body)) => utils::write_response(writer, &head, &body).await,
            Err(e) => utils::write_error(writer, &e).await,
        }
    }

    /// Pass-through to the external signal service: body forwarded
    /// verbatim, upstream status and body relayed verbatim.
    async fn forward(&self, payload: String) -> Result<(String, String), ServiceError> {
        let response = self
            .http
            .post(&CONFIG.recommendation_url)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((
            utils::status_head(status.as_u16(), status.canonical_reason().unwrap_or("")),
            body,
        ))
    }

    pub async fn buy<W>(&self, user_id: i32, request: &Request, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self.do_buy(user_id, request.body.as_deref()).await {
            Ok(()) => utils::write_message(writer, CREATED, "Buy Trade Successful").await,
            Err(e) => utils::write_error(writer, &e).await,
        }
    }

    async fn do_buy(&self, user_id: i32, body: Option<&str>) -> Result<(), ServiceError> {
        let order: BuyOrder = parse_body(body)?;
        let user = self
            .user_repo
            .get_by_user_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;
        self.ledger_repo.record_buy(user.user_id, &order).await
    }

    pub async fn sell<W>(&self, user_id: i32, request: &Request, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self.do_sell(user_id, request.body.as_deref()).await {
            Ok(()) => utils::write_message(writer, CREATED, "Sell Trade Successful").await,
            Err(e) => utils::write_error(writer, &e).await,
        }
    }

    async fn do_sell(&self, user_id: i32, body: Option<&str>) -> Result<(), ServiceError> {
        let order: SellOrder = parse_body(body)?;
        let user = self
            .user_repo
            .get_by_user_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;
        self.ledger_repo.record_sell(user.user_id, &order).await
    }

    pub async fn dashboard<W>(&self, user_id: i32, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self.do_dashboard(user_id).await {
            Ok(view) => utils::write_json(writer, OK_RESPONSE, &view).await,
            Err(e) => utils::write_error(writer, &e).await,
        }
    }

    async fn do_dashboard(&self, user_id: i32) -> Result<DashboardView, ServiceError> {
        let user = self
            .user_repo
            .get_by_user_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;
        let holdings = self.portfolio_repo.get_holdings(user.user_id).await?;
        let activities = self.ledger_repo.activities(user.user_id).await?;
        Ok(DashboardView::build(&user, holdings, activities))
    }
}
