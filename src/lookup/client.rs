//! HTTP client for the Alchemy NFT and token-metadata APIs.

use super::source::HolderSource;
use super::types::{ContractMetadata, JsonRpcRequest, JsonRpcResponse, OwnersPage};
use crate::aggregator::HolderSet;
use crate::utils::config::{DEFAULT_HTTP_TIMEOUT, DEFAULT_MAX_PAGES};
use crate::utils::error::LookupError;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use reqwest::Url;

/// Client for the holder lookup service
pub struct AlchemyClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_pages: usize,
}

impl AlchemyClient {
    /// Create a client for an Alchemy network (e.g. `base-mainnet`)
    pub fn new(api_key: impl Into<String>, network: &str) -> Result<Self, LookupError> {
        Self::with_base_url(api_key, default_base_url(network))
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(LookupError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    /// Limit how many owner pages are followed per contract
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Fetch every current owner of a contract
    pub fn owners_for_contract(&self, contract: &str) -> Result<HolderSet, LookupError> {
        if contract.is_empty() {
            return Err(LookupError::MissingAddress);
        }

        info!("Fetching holders for contract: {}", contract);

        let holders = collect_owner_pages(contract, self.max_pages, |page_key| {
            self.owners_page(contract, page_key)
        })?;

        info!("Found {} holders for {}", holders.len(), contract);
        Ok(holders)
    }

    /// Fetch descriptive metadata for a contract
    pub fn token_metadata(&self, contract: &str) -> Result<ContractMetadata, LookupError> {
        if contract.is_empty() {
            return Err(LookupError::MissingAddress);
        }

        debug!("Fetching metadata for contract: {}", contract);

        let request = JsonRpcRequest::token_metadata(contract, 1);
        let response = self
            .client
            .post(self.rpc_url())
            .json(&request)
            .send()
            .map_err(LookupError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(LookupError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let rpc_response: JsonRpcResponse<ContractMetadata> =
            response.json().map_err(LookupError::RequestFailed)?;

        if let Some(error) = rpc_response.error {
            return Err(LookupError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| LookupError::InvalidResponse("Missing result field".to_string()))
    }

    /// Fetch a single page of owners
    ///
    /// **Private** - pagination is driven by owners_for_contract
    fn owners_page(&self, contract: &str, page_key: Option<&str>) -> Result<OwnersPage, LookupError> {
        let mut params = vec![
            ("contractAddress", contract),
            ("withTokenBalances", "false"),
        ];
        if let Some(key) = page_key {
            params.push(("pageKey", key));
        }

        let url = Url::parse_with_params(&self.owners_url(), &params)
            .map_err(|e| LookupError::InvalidUrl(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(LookupError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(LookupError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        response.json().map_err(LookupError::RequestFailed)
    }

    fn owners_url(&self) -> String {
        format!("{}/nft/v3/{}/getOwnersForContract", self.base_url, self.api_key)
    }

    fn rpc_url(&self) -> String {
        format!("{}/v2/{}", self.base_url, self.api_key)
    }
}

impl HolderSource for AlchemyClient {
    fn holders_for(&self, contract: &str) -> Result<HolderSet, LookupError> {
        self.owners_for_contract(contract)
    }

    fn metadata_for(&self, contract: &str) -> Result<ContractMetadata, LookupError> {
        self.token_metadata(contract)
    }
}

/// Follow `pageKey` links until the last page or `max_pages`
fn collect_owner_pages(
    contract: &str,
    max_pages: usize,
    mut fetch: impl FnMut(Option<&str>) -> Result<OwnersPage, LookupError>,
) -> Result<HolderSet, LookupError> {
    let mut holders = HolderSet::new();
    let mut page_key: Option<String> = None;

    for page_number in 1..=max_pages {
        let page = fetch(page_key.as_deref())?;
        debug!("Page {}: {} owners", page_number, page.owners.len());

        holders.extend(page.owners);
        page_key = page.page_key.filter(|key| !key.is_empty());

        if page_key.is_none() {
            break;
        }
    }

    if page_key.is_some() {
        warn!("Holder list for {} truncated after {} pages", contract, max_pages);
    }

    Ok(holders)
}

/// Base URL of an Alchemy network
pub fn default_base_url(network: &str) -> String {
    format!("https://{}.g.alchemy.com", network)
}
