//! HTTP strategies behind the [`TransportMode`] setting.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::domain::TransportMode;
use crate::transport::{append_query, serialize_form, synthesize_error_body};

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;
pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    /// GET with the configured client (timeout, user agent, TLS policy).
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    /// POST `params` as a form body with the configured client.
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    /// GET with default client settings.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    client: reqwest::Client,
    /// Default-settings client for simple fetch, set only when `client` is customized.
    plain: Option<reqwest::Client>,
}

impl ReqwestTransport {
    /// One client, and one connection pool, for every mode.
    pub(crate) fn shared(client: reqwest::Client) -> Self {
        Self {
            client,
            plain: None,
        }
    }

    /// A customized client for GET/POST plus a default one for simple fetch.
    pub(crate) fn split(client: reqwest::Client, plain: reqwest::Client) -> Self {
        Self {
            client,
            plain: Some(plain),
        }
    }

    #[cfg(test)]
    pub(crate) fn shares_pool(&self) -> bool {
        self.plain.is_none()
    }

    async fn read(request: reqwest::RequestBuilder) -> Result<HttpResponse, BoxError> {
        // Request errors carry the URL, and the URL carries the credentials.
        let response = request.send().await.map_err(|err| err.without_url())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| err.without_url())?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(Self::read(self.client.get(url)))
    }

    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move { Self::read(self.client.post(url).form(&params)).await })
    }

    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        let client = self.plain.as_ref().unwrap_or(&self.client);
        Box::pin(Self::read(client.get(url)))
    }
}

/// What was sent and what came back from a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Exchange {
    pub url: String,
    pub body: Option<String>,
    pub raw: String,
}

/// Send `params` to `url` once using `mode`.
///
/// Never fails: transport errors and non-2xx statuses come back as a
/// synthesized `ERROR;0;<reason>` body.
pub(crate) async fn execute(
    http: &dyn HttpTransport,
    mode: TransportMode,
    url: &str,
    params: Vec<(String, String)>,
) -> Exchange {
    let serialized = serialize_form(&params);
    let (url, body, result) = match mode {
        TransportMode::QueryGet => {
            let url = append_query(url, &serialized);
            let result = http.get(&url).await;
            (url, None, result)
        }
        TransportMode::BodyPost => {
            let result = http.post_form(url, params).await;
            (url.to_owned(), Some(serialized), result)
        }
        TransportMode::SimpleFetch => {
            let url = append_query(url, &serialized);
            let result = http.fetch(&url).await;
            (url, None, result)
        }
    };

    let raw = match result {
        Ok(response) if (200..=299).contains(&response.status) => response.body,
        Ok(response) => {
            warn!(mode = %mode, status = response.status, "unexpected HTTP status");
            synthesize_error_body(&format!("Unexpected HTTP code {}", response.status))
        }
        Err(err) => {
            let reason = error_chain(err.as_ref());
            warn!(mode = %mode, error = %reason, "HTTP request failed");
            synthesize_error_body(&reason)
        }
    };

    Exchange { url, body, raw }
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("error sending request")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl StdError for Inner {}

    #[test]
    fn error_chain_joins_sources() {
        assert_eq!(
            error_chain(&Outer(Inner)),
            "error sending request: connection refused"
        );
    }
}
