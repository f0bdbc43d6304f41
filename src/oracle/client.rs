use std::future::Future;

use tracing::{debug, instrument, warn};

use super::{OracleError, OracleRequest, OracleResponse};
use crate::config::OracleConfig;

/// Anything that can grade a request. Retry and timeout policy belong to the
/// implementation, not to the session driving it.
pub trait Oracle {
    fn simulate(
        &self,
        request: &OracleRequest,
    ) -> impl Future<Output = Result<OracleResponse, OracleError>> + Send;
}

/// Grading service reached over HTTP: `POST {base_url}{endpoint}` with a JSON body.
#[derive(Clone, Debug)]
pub struct HttpOracle {
    client: reqwest::Client,
    url: String,
}

impl HttpOracle {
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.simulate_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Oracle for HttpOracle {
    #[instrument(skip_all, fields(url = %self.url, gates = request.len()))]
    async fn simulate(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, "oracle rejected request");
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: OracleResponse = serde_json::from_str(&body)?;
        debug!(message = %response.message, "oracle responded");
        Ok(response)
    }
}
