//! HTTP client for the Open Library search API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use shelfview_core::SourceUrl;
use shelfview_core::error::{Error, ProtocolError, TransportError};

use crate::endpoints::{ErrorResponse, SearchQuery, SearchResponse};

/// Map a reqwest failure onto the shelfview error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// HTTP client for `search.json` requests.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    base: SourceUrl,
}

impl SearchClient {
    /// Create a client for the given base URL.
    ///
    /// With no `timeout` a request may wait indefinitely.
    pub fn new(base: SourceUrl, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("shelfview/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self { client, base })
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &SourceUrl {
        &self.base
    }

    /// Run one search.
    #[instrument(skip(self), fields(base = %self.base))]
    pub(crate) async fn search(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<SearchResponse, Error> {
        let url = self.base.search_url();
        let params = SearchQuery {
            q: query,
            page,
            limit,
        };
        debug!(%url, "search request");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "search response");

        if !status.is_success() {
            return Err(Error::Protocol(self.parse_error_response(response).await));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::Protocol(ProtocolError::malformed(e.to_string())))
    }

    /// Build a protocol error from a non-success response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(Some(status), body.error),
            Err(_) => ProtocolError::new(Some(status), None),
        }
    }
}
