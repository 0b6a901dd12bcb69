use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use indexmap::IndexMap;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::first_env_var;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    config::AlpacaConfig,
    models::{bar::Bar, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidApiKeySnafu, MalformedSnafu,
        MissingEnvVarSnafu, ProviderError, ProviderInitError, ReqwestSnafu,
        alpaca_rest::{
            params::{AlpacaBarsParams, construct_params, validate_request},
            response::{AlpacaBar, AlpacaResponse},
        },
    },
};

const KEY_ID_VARS: &[&str] = &["APCA_API_KEY_ID", "ALPACA_API_KEY"];
const SECRET_KEY_VARS: &[&str] = &["APCA_API_SECRET_KEY", "ALPACA_SECRET_KEY"];

pub struct AlpacaProvider {
    client: Client,
    base_url: String,
    defaults: AlpacaBarsParams,
    limiter: DefaultDirectRateLimiter,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from `APCA_API_KEY_ID` / `APCA_API_SECRET_KEY`, falling
    /// back to `ALPACA_API_KEY` / `ALPACA_SECRET_KEY`.
    pub fn new(config: &AlpacaConfig) -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(first_env_var(KEY_ID_VARS).context(MissingEnvVarSnafu)?.into());
        let secret_key =
            SecretString::new(first_env_var(SECRET_KEY_VARS).context(MissingEnvVarSnafu)?.into());
        Self::with_credentials(api_key, secret_key, config)
    }

    /// Creates a provider from explicit credentials.
    pub fn with_credentials(
        api_key: SecretString,
        secret_key: SecretString,
        config: &AlpacaConfig,
    ) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert("APCA-API-KEY-ID", sensitive(&api_key)?);
        headers.insert("APCA-API-SECRET-KEY", sensitive(&secret_key)?);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: config.data_url.clone(),
            defaults: AlpacaBarsParams {
                adjustment: Some(config.adjustment),
                feed: Some(config.feed),
                ..Default::default()
            },
            limiter: RateLimiter::direct(Quota::per_minute(config.requests_per_minute)),
        })
    }
}

fn sensitive(secret: &SecretString) -> Result<header::HeaderValue, ProviderInitError> {
    let mut value =
        header::HeaderValue::from_str(secret.expose_secret()).context(InvalidApiKeySnafu)?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        validate_request(&params)?;

        let mut all_bars: IndexMap<String, Vec<AlpacaBar>> = IndexMap::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut query_params = construct_params(&params, &self.defaults);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            self.limiter.until_ready().await;
            let response = self
                .client
                .get(&self.base_url)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    status: status.as_u16(),
                    message,
                }
                .fail();
            }

            let page = response.json::<AlpacaResponse>().await.context(ReqwestSnafu)?;
            pages += 1;

            // Pages continue each symbol where the previous page stopped.
            for (symbol, bars) in page.bars.unwrap_or_default() {
                debug!(%symbol, page = pages, bars = bars.len(), "received bars page");
                all_bars.entry(symbol).or_default().extend(bars);
            }

            match page.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        let result = all_bars
            .into_iter()
            .map(|(symbol, alpaca_bars)| {
                let bars: Vec<Bar> = alpaca_bars.into_iter().map(Bar::from).collect();
                info!(%symbol, timeframe = %params.timeframe, bars = bars.len(), "fetched bars");
                BarSeries::new(symbol.clone(), params.timeframe, bars)
                    .context(MalformedSnafu { symbol })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(result)
    }
}
