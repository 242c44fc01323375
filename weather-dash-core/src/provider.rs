use crate::{Config, FetchError, WeatherRecord, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather by city name.
///
/// One call is one outbound request: implementations do not retry and do not
/// cache. There is no cancellation beyond dropping the returned future.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, FetchError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here; the provider rejects the request
/// and the caller sees it as a failed lookup.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = config.api_key.clone().unwrap_or_else(|| {
        tracing::warn!(
            "No OpenWeather API key configured. \
             Set OPENWEATHER_API_KEY or run `weather-dash configure`."
        );
        String::new()
    });

    let provider = match &config.base_url {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key, base_url.clone()),
        None => OpenWeatherProvider::new(api_key),
    };

    Box::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_accepts_missing_api_key() {
        let cfg = Config::default();
        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains("OpenWeatherProvider"));
    }

    #[test]
    fn provider_from_config_uses_base_url_override() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://127.0.0.1:9999".into()),
        };

        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains("http://127.0.0.1:9999"));
    }
}
