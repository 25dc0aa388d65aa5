use std::time::Duration;

use crate::{rpc::RpcClient, HttpTransport, RpcError};

#[derive(Debug, Clone)]
pub struct TransportBuilder {
    url: String,
    timeout: Option<Duration>,
    poa_extra_data: bool,
}

impl TransportBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            poa_extra_data: false,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Blocks fetched through the resulting client get proof-of-authority `extraData` handling.
    pub fn poa_extra_data(mut self) -> Self {
        self.poa_extra_data = true;
        self
    }

    pub fn build_http(self) -> Result<HttpTransport, RpcError> {
        match self.timeout {
            Some(timeout) => HttpTransport::with_timeout(self.url, timeout),
            None => HttpTransport::new(self.url),
        }
    }

    pub fn build_client(self) -> Result<RpcClient, RpcError> {
        let poa_extra_data = self.poa_extra_data;
        let client = RpcClient::new(self.build_http()?);

        Ok(if poa_extra_data {
            client.with_poa_extra_data()
        } else {
            client
        })
    }
}
