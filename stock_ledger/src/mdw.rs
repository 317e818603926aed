use anyhow::{Context, Result, anyhow};
use request_http_parser::parser::Request;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::constant::BAD_REQUEST;

pub struct Middleware {}

impl Middleware {
    /// Reads one request off the stream and parses it. Oversized or
    /// malformed input gets a 400 written back and an Err returned so the
    /// caller drops the connection.
    pub async fn new<S>(stream: &mut S) -> Result<Request>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut buffer = [0; 1024];
        let size = stream
            .read(&mut buffer)
            .await
            .context("Failed to read stream")?;
        if size >= 1024 {
            let _ = stream
                .write_all(
                    format!("{}{}", BAD_REQUEST, r#"{"message":"Request too large"}"#).as_bytes(),
                )
                .await;
            let _ = stream.flush().await;
            return Err(anyhow!("request too large"));
        }
        let req_str = String::from_utf8_lossy(&buffer[..size]);
        match Request::new(&req_str) {
            Ok(request) => Ok(request),
            Err(e) => {
                let _ = stream
                    .write_all(
                        format!("{}{}", BAD_REQUEST, r#"{"message":"Invalid request"}"#).as_bytes(),
                    )
                    .await;
                let _ = stream.flush().await;
                Err(anyhow!("request format invalid: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use request_http_parser::parser::Method;
    use tokio::io::duplex;

    #[tokio::test]
    async fn parses_a_plain_get() {
        let (mut client, mut server) = duplex(2048);
        client
            .write_all(b"GET /api/dashboard/7 HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let request = Middleware::new(&mut server).await.unwrap();
        assert!(matches!(request.method, Method::GET));
        assert_eq!(request.path, "/api/dashboard/7");
    }

    #[tokio::test]
    async fn parses_a_post_with_body() {
        let (mut client, mut server) = duplex(2048);
        client
            .write_all(
                b"POST /api/auth/login HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"username\":\"alice\",\"password\":\"pw\"}",
            )
            .await
            .unwrap();
        let request = Middleware::new(&mut server).await.unwrap();
        assert!(matches!(request.method, Method::POST));
        let body = request.body.expect("body");
        assert!(body.contains("alice"));
    }

    #[tokio::test]
    async fn rejects_oversized_requests() {
        let (mut client, mut server) = duplex(4096);
        let big = vec![b'a'; 2048];
        client.write_all(&big).await.unwrap();
        assert!(Middleware::new(&mut server).await.is_err());
    }
}
