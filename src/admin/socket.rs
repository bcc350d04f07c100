//! Admin socket capability

use log::debug;
use reqwest::{Client, Method};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::sockets;
use crate::error::{PassengerError, Result};
use crate::instance::{AdminCredentials, Instance};

use super::message::{AdminRequest, AdminResponse};

/// Something that can send admin API requests to an instance's named
/// control sockets (e.g. `agents.s/core_api`)
#[allow(async_fn_in_trait)]
pub trait AdminSocket {
    /// Send `request` to the control socket `socket_name`
    async fn request(&self, socket_name: &str, request: AdminRequest) -> Result<AdminResponse>;

    /// Full admin credentials to attach to requests, if available
    fn credentials(&self) -> Option<&AdminCredentials> {
        None
    }
}

impl AdminSocket for Instance {
    async fn request(&self, socket_name: &str, request: AdminRequest) -> Result<AdminResponse> {
        let timeout = Duration::from_secs(sockets::REQUEST_TIMEOUT_SECS);
        send_over_socket(self.socket_path(socket_name), request, timeout).await
    }

    fn credentials(&self) -> Option<&AdminCredentials> {
        Instance::credentials(self)
    }
}

/// Send one request over the Unix socket at `socket_path`
async fn send_over_socket(
    socket_path: PathBuf,
    request: AdminRequest,
    timeout: Duration,
) -> Result<AdminResponse> {
    let target = socket_path.display().to_string();
    debug!("{} {} via {}", request.method, request.path, target);

    let method =
        Method::from_bytes(request.method.as_bytes()).map_err(|e| PassengerError::Transport {
            target: target.clone(),
            status: None,
            body: e.to_string(),
        })?;

    // One client per exchange: each socket is dialed once per command
    let client = Client::builder()
        .unix_socket(socket_path)
        .connect_timeout(Duration::from_secs(sockets::CONNECT_TIMEOUT_SECS))
        .timeout(timeout)
        .build()?;

    let mut builder = client.request(method, format!("{}{}", sockets::BASE_URL, request.path));
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder.body(request.body).send().await?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_ascii_lowercase(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.bytes().await?.to_vec();

    debug!("Response status {} from {}", status, target);
    Ok(AdminResponse {
        status,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceProperties;
    use std::path::Path;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixListener;

    const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 15\r\nConnection: close\r\n\r\n{\"status\":\"ok\"}";

    fn instance(dir: PathBuf, credentials: Option<AdminCredentials>) -> Instance {
        let properties: InstanceProperties =
            serde_json::from_str(r#"{"name": "test", "watchdog_pid": 1}"#).unwrap();
        Instance::new(dir, properties, credentials)
    }

    /// Answer the first connection on `socket_path` with `response` and
    /// return the request head that was received
    fn serve_once(socket_path: &Path, response: &'static str) -> tokio::task::JoinHandle<String> {
        let listener = UnixListener::bind(socket_path).unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut received = Vec::new();
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                received.extend_from_slice(&buf[..n]);
                if n == 0 || received.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&received).into_owned()
        })
    }

    #[test]
    fn test_instance_exposes_credentials() {
        let creds = AdminCredentials::new("admin", "pw");
        let with = instance(PathBuf::from("/tmp/x"), Some(creds.clone()));
        assert_eq!(AdminSocket::credentials(&with), Some(&creds));

        let without = instance(PathBuf::from("/tmp/x"), None);
        assert!(AdminSocket::credentials(&without).is_none());
    }

    #[tokio::test]
    async fn test_request_over_unix_socket() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("agents.s")).unwrap();
        let server = serve_once(&dir.path().join(sockets::CORE), OK_RESPONSE);

        let instance = instance(dir.path().to_path_buf(), None);
        let request = AdminRequest::post(sockets::REINHERIT_LOGS_PATH)
            .json()
            .basic_auth(&AdminCredentials::new("admin", "secret"));
        let response = instance.request(sockets::CORE, request).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_json());
        assert_eq!(response.body_text(), r#"{"status":"ok"}"#);

        let received = server.await.unwrap().to_ascii_lowercase();
        assert!(received.starts_with("post /reinherit_logs.json http/1.1\r\n"));
        assert!(received.contains("content-type: application/json\r\n"));
        assert!(received.contains("authorization: basic ywrtaw46c2vjcmv0\r\n"));
    }

    #[tokio::test]
    async fn test_chunked_response_is_decoded() {
        let dir = TempDir::new().unwrap();
        let socket_path = dir.path().join("core_api");
        let _server = serve_once(
            &socket_path,
            "HTTP/1.1 503 Service Unavailable\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\n\r\n4\r\n{\"co\r\nb\r\nde\":\"OOPS\"}\r\n0\r\n\r\n",
        );

        let response = send_over_socket(
            socket_path,
            AdminRequest::post(sockets::REINHERIT_LOGS_PATH),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(response.body_text(), r#"{"code":"OOPS"}"#);
    }

    #[tokio::test]
    async fn test_oversized_chunk_is_an_error() {
        let dir = TempDir::new().unwrap();
        let socket_path = dir.path().join("core_api");
        let _server = serve_once(
            &socket_path,
            "HTTP/1.1 500 Oops\r\nContent-Type: text/plain\r\nTransfer-Encoding: chunked\r\n\r\nFFFFFFFFFFFFFFFF\r\nabc\r\n0\r\n\r\n",
        );

        let err = send_over_socket(
            socket_path,
            AdminRequest::post(sockets::REINHERIT_LOGS_PATH),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PassengerError::Http(_)));
    }

    #[tokio::test]
    async fn test_missing_socket_is_http_error() {
        let dir = TempDir::new().unwrap();
        let instance = instance(dir.path().to_path_buf(), None);

        let err = instance
            .request(sockets::WATCHDOG, AdminRequest::post(sockets::REOPEN_LOGS_PATH))
            .await
            .unwrap_err();
        assert!(matches!(err, PassengerError::Http(_)));
    }

    #[tokio::test]
    async fn test_unanswered_request_times_out() {
        let dir = TempDir::new().unwrap();
        let socket_path = dir.path().join("hung_api");
        let listener = UnixListener::bind(&socket_path).unwrap();

        // Accept and hold the connection without answering
        let _server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(stream);
        });

        let err = send_over_socket(
            socket_path,
            AdminRequest::post(sockets::REOPEN_LOGS_PATH),
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();
        match err {
            PassengerError::Http(e) => assert!(e.is_timeout()),
            other => panic!("Expected Http error, got {:?}", other),
        }
    }
}
