use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::error;

use crate::error::ServiceError;

pub fn des_from_str<T: for<'a> Deserialize<'a> + Serialize>(
    string: &str,
) -> Result<T, serde_json::Error> {
    serde_json::from_str(string)
}

pub fn ser_to_str<T: for<'a> Deserialize<'a> + Serialize>(
    t: &T,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(t)
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Message {
    pub message: String,
}

/// Status line for relayed upstream responses, where the code is not one
/// of the fixed constants.
pub fn status_head(code: u16, reason: &str) -> String {
    format!("HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n\r\n", code, reason)
}

pub async fn write_response<W>(writer: &mut W, head: &str, body: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(format!("{}{}", head, body).as_bytes()).await?;
    Ok(())
}

pub async fn write_json<W, T>(writer: &mut W, head: &str, payload: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: for<'a> Deserialize<'a> + Serialize,
{
    let body = ser_to_str(payload)?;
    write_response(writer, head, &body).await
}

pub async fn write_message<W>(writer: &mut W, head: &str, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    write_json(
        writer,
        head,
        &Message {
            message: text.to_string(),
        },
    )
    .await
}

pub async fn write_error<W>(writer: &mut W, err: &ServiceError) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    error!("{:?}", err);
    write_message(writer, err.status_line(), &err.public_message()).await
}
