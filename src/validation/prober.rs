use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{defaults, error_messages};
use crate::core::error::Result;
use crate::core::types::Outcome;

/// Performs the network check for one probeable URL.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str) -> Outcome;
}

#[async_trait]
impl<T: Probe + ?Sized> Probe for Arc<T> {
    async fn probe(&self, url: &str) -> Outcome {
        (**self).probe(url).await
    }
}

/// Probes URLs with a single reqwest request each, following redirects.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
    use_head_requests: bool,
}

impl HttpProber {
    pub fn new(timeout: Duration, user_agent: &str, use_head_requests: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(defaults::MAX_REDIRECTS))
            .user_agent(user_agent)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            timeout,
            use_head_requests,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.timeout_duration(),
            config.effective_user_agent(),
            config.use_head_requests.unwrap_or(false),
        )
    }

    fn describe_error(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            return format!(
                "{} after {}ms",
                error_messages::OPERATION_TIMED_OUT,
                self.timeout.as_millis()
            );
        }

        // Every distinct cause, outermost first
        let mut causes: Vec<String> = Vec::new();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !text.is_empty() && !causes.contains(&text) {
                causes.push(text);
            }
            source = cause.source();
        }

        let description = if causes.is_empty() {
            err.to_string()
        } else {
            causes.join(": ")
        };
        if description.is_empty() {
            error_messages::UNKNOWN_ERROR.to_string()
        } else {
            description
        }
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, url: &str) -> Outcome {
        let request = if self.use_head_requests {
            self.client.head(url)
        } else {
            self.client.get(url)
        };

        match request.send().await {
            Ok(response) => classify_response(url, response.status(), response.url()),
            Err(err) => Outcome::TransportError {
                message: self.describe_error(&err),
            },
        }
    }
}

/// Map a completed response onto an [`Outcome`].
///
/// `final_url` is where the redirect chain ended. It is compared to the
/// requested URL after parsing, so cosmetic differences such as an added
/// trailing slash on a bare host do not count as a redirect.
pub fn classify_response(requested: &str, status: StatusCode, final_url: &Url) -> Outcome {
    let status_code = status.as_u16();
    let reason_phrase = || {
        status
            .canonical_reason()
            .unwrap_or(error_messages::UNKNOWN_ERROR)
            .to_string()
    };

    if status.is_success() {
        let redirected = Url::parse(requested).map_or(true, |parsed| &parsed != final_url);
        let final_url = if redirected {
            final_url.to_string()
        } else {
            requested.to_string()
        };
        Outcome::Live {
            status_code,
            final_url,
        }
    } else if status.is_client_error() {
        Outcome::ClientError {
            status_code,
            reason_phrase: reason_phrase(),
        }
    } else if status.is_server_error() {
        Outcome::ServerError {
            status_code,
            reason_phrase: reason_phrase(),
        }
    } else {
        // 1xx or an unfollowed 3xx: a status line, but no usable answer
        Outcome::TransportError {
            message: format!("unexpected final status {status_code} {}", reason_phrase()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::Server;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    fn prober(timeout: Duration) -> HttpProber {
        HttpProber::new(timeout, defaults::USER_AGENT, false).expect("client builds")
    }

    #[test]
    fn test_classify_response__success_without_redirect() {
        let url = Url::parse("https://docs.foo.io").unwrap();

        let outcome = classify_response("https://docs.foo.io", StatusCode::OK, &url);

        assert_eq!(
            outcome,
            Outcome::Live {
                status_code: 200,
                final_url: "https://docs.foo.io".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_response__success_after_redirect() {
        let url = Url::parse("https://docs.foo.io/v2/").unwrap();

        let outcome = classify_response("https://docs.foo.io/v1", StatusCode::OK, &url);

        assert_eq!(
            outcome,
            Outcome::Live {
                status_code: 200,
                final_url: "https://docs.foo.io/v2/".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_response__error_statuses() {
        let url = Url::parse("https://docs.foo.io/x").unwrap();

        assert_eq!(
            classify_response("https://docs.foo.io/x", StatusCode::NOT_FOUND, &url),
            Outcome::ClientError {
                status_code: 404,
                reason_phrase: "Not Found".to_string(),
            }
        );
        assert_eq!(
            classify_response("https://docs.foo.io/x", StatusCode::BAD_GATEWAY, &url),
            Outcome::ServerError {
                status_code: 502,
                reason_phrase: "Bad Gateway".to_string(),
            }
        );
        assert!(matches!(
            classify_response("https://docs.foo.io/x", StatusCode::NOT_MODIFIED, &url),
            Outcome::TransportError { .. }
        ));
    }

    #[tokio::test]
    async fn test_probe__handles_url_with_status_code() {
        let mut server = Server::new_async().await;
        let _m = server.mock("GET", "/200").with_status(200).create_async().await;
        let endpoint = server.url() + "/200";

        let outcome = prober(Duration::from_secs(5)).probe(&endpoint).await;

        assert_eq!(
            outcome,
            Outcome::Live {
                status_code: 200,
                final_url: endpoint,
            }
        );
    }

    #[tokio::test]
    async fn test_probe__follows_redirect() {
        let mut server = Server::new_async().await;
        let target = server.url() + "/new";
        let _old = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", &target)
            .create_async()
            .await;
        let _new = server.mock("GET", "/new").with_status(200).create_async().await;

        let outcome = prober(Duration::from_secs(5))
            .probe(&(server.url() + "/old"))
            .await;

        assert_eq!(
            outcome,
            Outcome::Live {
                status_code: 200,
                final_url: target,
            }
        );
    }

    #[tokio::test]
    async fn test_probe__client_and_server_errors() {
        let mut server = Server::new_async().await;
        let _m404 = server.mock("GET", "/404").with_status(404).create_async().await;
        let _m503 = server.mock("GET", "/503").with_status(503).create_async().await;
        let prober = prober(Duration::from_secs(5));

        assert_eq!(
            prober.probe(&(server.url() + "/404")).await,
            Outcome::ClientError {
                status_code: 404,
                reason_phrase: "Not Found".to_string(),
            }
        );
        assert_eq!(
            prober.probe(&(server.url() + "/503")).await,
            Outcome::ServerError {
                status_code: 503,
                reason_phrase: "Service Unavailable".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_probe__sends_user_agent() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/ua")
            .match_header("user-agent", "TestAgent/1.0")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let prober = HttpProber::new(Duration::from_secs(5), "TestAgent/1.0", false).unwrap();
        let outcome = prober.probe(&(server.url() + "/ua")).await;

        assert_eq!(outcome.status_code(), Some(200));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe__with_head_requests() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("HEAD", "/head-test")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let prober = HttpProber::new(Duration::from_secs(5), defaults::USER_AGENT, true).unwrap();
        let outcome = prober.probe(&(server.url() + "/head-test")).await;

        assert_eq!(outcome.status_code(), Some(200));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe__timeout_reached() {
        // Accepts connections but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                held.push(socket);
            }
        });

        let start = std::time::Instant::now();
        let outcome = prober(Duration::from_millis(200))
            .probe(&format!("http://{addr}/slow"))
            .await;

        match outcome {
            Outcome::TransportError { message } => {
                assert!(message.contains("timed out"), "{message}")
            }
            other => panic!("expected transport error, got {other:?}"),
        }
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_probe__connection_refused() {
        // Bind then drop to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();

        let outcome = prober(Duration::from_secs(2))
            .probe(&format!("http://{addr}/gone"))
            .await;

        match outcome {
            Outcome::TransportError { message } => assert!(
                message.to_lowercase().contains("refused"),
                "cause missing from '{message}'"
            ),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_probe__dns_failure_and_refused_connection_differ() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let prober = prober(Duration::from_secs(5));

        let refused = prober.probe(&format!("http://{addr}/gone")).await;
        let unresolvable = prober.probe("http://nonexistent-host-zz9.invalid/x").await;

        match (refused, unresolvable) {
            (
                Outcome::TransportError { message: refused },
                Outcome::TransportError {
                    message: unresolvable,
                },
            ) => {
                assert_ne!(refused, unresolvable);
                assert!(unresolvable.to_lowercase().contains("dns"), "{unresolvable}");
            }
            other => panic!("expected two transport errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_probe__malformed_url() {
        let outcome = prober(Duration::from_secs(1)).probe("http://").await;

        assert!(matches!(outcome, Outcome::TransportError { .. }));
    }
}
