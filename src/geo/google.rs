//! Google geolocation/geocoding backend
//!
//! Three upstream calls share one HTTP client with a bounded timeout:
//! network-based geolocation (POST), reverse geocoding and forward
//! geocoding (GET). Every call requires the API key and is checked
//! before any I/O happens.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{Coordinate, GeoProvider, ResolvedLocation};
use serde::Deserialize;
use std::time::Duration;

/// Geocode responses with this status carry usable results
const STATUS_OK: &str = "OK";

/// Google-backed geolocation/geocoding client
#[derive(Debug, Clone)]
pub struct GoogleClient {
    client: reqwest::Client,
    geolocation_url: String,
    geocode_url: String,
    api_key: String,
}

/// Geolocation API response
#[derive(Debug, Deserialize)]
struct GeolocateResponse {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Geocoding API response envelope (forward and reverse share it)
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

impl GoogleClient {
    /// Create a client from configuration
    ///
    /// Endpoint URLs, the per-call timeout and the API key all come from
    /// config; the key may be empty, in which case every call fails with
    /// `MissingCredential` before touching the network.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            geolocation_url: config.upstream.geolocation_url.clone(),
            geocode_url: config.upstream.geocode_url.clone(),
            api_key: config.api_keys.google.clone(),
        })
    }

    /// The configured key, or `MissingCredential` when absent
    fn credential(&self) -> Result<&str> {
        if self.api_key.is_empty() {
            return Err(Error::MissingCredential);
        }
        Ok(&self.api_key)
    }

    /// Map a reqwest failure to the crate's upstream error kinds
    fn transport_error(context: &str, err: reqwest::Error) -> Error {
        if err.is_decode() {
            Error::UpstreamShape(format!("{}: {}", context, err))
        } else {
            Error::UpstreamUnavailable(format!("{}: {}", context, err))
        }
    }

    /// Issue a GET against the geocoding endpoint and parse the envelope
    async fn fetch_geocode(&self, query: &str) -> Result<GeocodeResponse> {
        let key = self.credential()?;
        let url = format!(
            "{}?{}&key={}",
            self.geocode_url,
            query,
            urlencoding::encode(key)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_error("geocode request failed", e))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "geocode endpoint returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Self::transport_error("geocode response", e))
    }
}

impl GeoProvider for GoogleClient {
    async fn locate(&self) -> Result<Coordinate> {
        let key = self.credential()?;
        let url = format!("{}?key={}", self.geolocation_url, urlencoding::encode(key));

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| Self::transport_error("geolocation request failed", e))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "geolocation endpoint returned status {}",
                response.status()
            )));
        }

        let data: GeolocateResponse = response
            .json()
            .await
            .map_err(|e| Self::transport_error("geolocation response", e))?;

        let location = data.location.ok_or_else(|| {
            Error::UpstreamShape("geolocation response has no 'location' field".to_string())
        })?;

        let coordinate = Coordinate::new(location.lat, location.lng);
        coordinate.validate()?;
        Ok(coordinate)
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<String>> {
        let query = format!("latlng={},{}", coordinate.lat, coordinate.lng);
        let data = self.fetch_geocode(&query).await?;

        if data.status != STATUS_OK {
            return Ok(None);
        }

        // Address is best-effort; a result without one counts as no address
        Ok(data
            .results
            .into_iter()
            .next()
            .and_then(|r| r.formatted_address))
    }

    async fn forward_geocode(&self, place: &str) -> Result<Option<ResolvedLocation>> {
        let query = format!("address={}", urlencoding::encode(place));
        let data = self.fetch_geocode(&query).await?;

        if data.status != STATUS_OK {
            return Ok(None);
        }

        let Some(result) = data.results.into_iter().next() else {
            return Ok(None);
        };

        let location = result
            .geometry
            .and_then(|g| g.location)
            .ok_or_else(|| {
                Error::UpstreamShape(
                    "geocode result is missing geometry.location".to_string(),
                )
            })?;

        let coordinate = Coordinate::new(location.lat, location.lng);
        coordinate.validate()?;

        Ok(Some(ResolvedLocation {
            coordinate,
            address: result.formatted_address,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use mockito::Matcher;

    fn test_client(geolocation_url: &str, geocode_url: &str, key: &str) -> GoogleClient {
        let mut config = Config::default();
        config.upstream.geolocation_url = geolocation_url.to_string();
        config.upstream.geocode_url = geocode_url.to_string();
        config.api_keys.google = key.to_string();
        GoogleClient::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_locate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/geolocate")
            .match_query(Matcher::UrlEncoded("key".into(), "k".into()))
            .with_status(200)
            .with_body(r#"{"location": {"lat": 12.9145732, "lng": 77.6385797}, "accuracy": 20.0}"#)
            .create_async()
            .await;

        let url = format!("{}/geolocate", server.url());
        let client = test_client(&url, &server.url(), "k");

        let coordinate = client.locate().await.unwrap();
        assert_eq!(coordinate.lat, 12.9145732);
        assert_eq!(coordinate.lng, 77.6385797);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_locate_missing_location_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/geolocate")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"accuracy": 20.0}"#)
            .create_async()
            .await;

        let url = format!("{}/geolocate", server.url());
        let client = test_client(&url, &server.url(), "k");

        let err = client.locate().await.unwrap_err();
        assert!(matches!(err, Error::UpstreamShape(_)));
    }

    #[tokio::test]
    async fn test_locate_without_credential_skips_network() {
        // A closed port: any attempted request would fail as a transport
        // error, so getting MissingCredential proves no call was made.
        let client = test_client("http://127.0.0.1:1/geolocate", "http://127.0.0.1:1", "");

        let err = client.locate().await.unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
    }

    #[tokio::test]
    async fn test_locate_transport_failure() {
        let client = test_client("http://127.0.0.1:1/geolocate", "http://127.0.0.1:1", "k");

        let err = client.locate().await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_forward_geocode_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/geocode")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("address".into(), "MG Road, Bengaluru".into()),
                Matcher::UrlEncoded("key".into(), "k".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                    "status": "OK",
                    "results": [{
                        "formatted_address": "MG Road, Bengaluru, Karnataka, India",
                        "geometry": {"location": {"lat": 12.9752, "lng": 77.6057}}
                    }]
                }"#,
            )
            .create_async()
            .await;

        let url = format!("{}/geocode", server.url());
        let client = test_client(&server.url(), &url, "k");

        let resolved = client
            .forward_geocode("MG Road, Bengaluru")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.coordinate.lat, 12.9752);
        assert_eq!(
            resolved.address.as_deref(),
            Some("MG Road, Bengaluru, Karnataka, India")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_forward_geocode_zero_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/geocode")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status": "ZERO_RESULTS", "results": []}"#)
            .create_async()
            .await;

        let url = format!("{}/geocode", server.url());
        let client = test_client(&server.url(), &url, "k");

        let resolved = client.forward_geocode("nowhere at all").await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_forward_geocode_missing_geometry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/geocode")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status": "OK", "results": [{"formatted_address": "somewhere"}]}"#)
            .create_async()
            .await;

        let url = format!("{}/geocode", server.url());
        let client = test_client(&server.url(), &url, "k");

        let err = client.forward_geocode("somewhere").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamShape(_)));
    }

    #[tokio::test]
    async fn test_reverse_geocode_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/geocode")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("latlng".into(), "12.9145732,77.6385797".into()),
                Matcher::UrlEncoded("key".into(), "k".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                    "status": "OK",
                    "results": [{
                        "formatted_address": "Hosur Road, Bengaluru, Karnataka, India",
                        "geometry": {"location": {"lat": 12.9145732, "lng": 77.6385797}}
                    }]
                }"#,
            )
            .create_async()
            .await;

        let url = format!("{}/geocode", server.url());
        let client = test_client(&server.url(), &url, "k");

        let address = client
            .reverse_geocode(Coordinate::new(12.9145732, 77.6385797))
            .await
            .unwrap();
        assert_eq!(
            address.as_deref(),
            Some("Hosur Road, Bengaluru, Karnataka, India")
        );
    }

    #[tokio::test]
    async fn test_reverse_geocode_non_ok_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/geocode")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status": "REQUEST_DENIED", "results": []}"#)
            .create_async()
            .await;

        let url = format!("{}/geocode", server.url());
        let client = test_client(&server.url(), &url, "k");

        let address = client
            .reverse_geocode(Coordinate::new(12.9, 77.6))
            .await
            .unwrap();
        assert!(address.is_none());
    }

    #[tokio::test]
    async fn test_geocode_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/geocode")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let url = format!("{}/geocode", server.url());
        let client = test_client(&server.url(), &url, "k");

        let err = client.forward_geocode("anywhere").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_forward_geocode_encodes_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/geocode")
            .match_query(Matcher::UrlEncoded(
                "address".into(),
                "caf& bar / 100%".into(),
            ))
            .with_status(200)
            .with_body(r#"{"status": "ZERO_RESULTS", "results": []}"#)
            .create_async()
            .await;

        let url = format!("{}/geocode", server.url());
        let client = test_client(&server.url(), &url, "k");

        let resolved = client.forward_geocode("caf& bar / 100%").await.unwrap();
        assert!(resolved.is_none());
        mock.assert_async().await;
    }
}
