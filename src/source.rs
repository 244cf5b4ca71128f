//! Where tablebase answers come from.

use futures::{FutureExt, future::BoxFuture};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::{
    canonical::CanonicalFen, config::ExplorerConfig, error::TablebaseError, types::ProbeAnswer,
};

/// An asynchronous lookup service.
///
/// The returned future must not borrow the source: the orchestrator keeps
/// accepting probes while a lookup is outstanding.
pub trait TablebaseSource {
    fn lookup(&self, position: &CanonicalFen) -> BoxFuture<'static, Result<ProbeAnswer, TablebaseError>>;
}

/// `GET <endpoint>?fen=<position>` against a syzygy-tables style API.
#[derive(Debug, Clone)]
pub struct HttpTablebase {
    client: Client,
    endpoint: Url,
}

impl HttpTablebase {
    pub fn new(config: &ExplorerConfig) -> Result<Self, TablebaseError> {
        let client = Client::builder().user_agent(config.user_agent.as_str()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn request_url(&self, position: &CanonicalFen) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("fen", position.as_str());
        url
    }
}

impl TablebaseSource for HttpTablebase {
    fn lookup(&self, position: &CanonicalFen) -> BoxFuture<'static, Result<ProbeAnswer, TablebaseError>> {
        let request = self.client.get(self.request_url(position));
        async move {
            let response = request.send().await?;
            let status = response.status();
            debug!(%status, url = %response.url(), "tablebase response");
            if !status.is_success() {
                return Err(error_for_status(status));
            }
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        }
        .boxed()
    }
}

fn error_for_status(status: StatusCode) -> TablebaseError {
    match status {
        StatusCode::BAD_REQUEST => TablebaseError::InvalidPosition,
        status => TablebaseError::Server(status),
    }
}
