//! `EtaEstimator` backed by OSRM's Route API.

use std::time::Duration;

use geo::Coord;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use waypost_core::{EtaError, EtaEstimator, EtaRequest};

use super::osrm::{CODE_NO_ROUTE, RouteResponse, profile_for};

/// Errors raised while building an [`OsrmEtaEstimator`].
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default OSRM endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = concat!("waypost/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OsrmEtaEstimator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmEtaEstimatorConfig {
    /// Base URL of the OSRM service.
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for OsrmEtaEstimatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmEtaEstimatorConfig {
    /// Configuration pointing at `base_url` with default timeout and agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Travel-time estimator that asks OSRM for the fastest route.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime, or inside a `current_thread` one, requests run
/// on the estimator's own runtime. Inside a multi-threaded runtime the
/// caller's handle is used with [`tokio::task::block_in_place`].
///
/// # Supported modes
///
/// Driving and walking map to the `driving` and `foot` profiles. Transit has
/// no OSRM profile and fails with [`EtaError::UnsupportedMode`] without any
/// network traffic.
pub struct OsrmEtaEstimator {
    client: Client,
    config: OsrmEtaEstimatorConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OsrmEtaEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmEtaEstimator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OsrmEtaEstimator {
    /// Create an estimator for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmEtaEstimatorConfig::new(base_url))
    }

    /// Create an estimator with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OsrmEtaEstimatorConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OsrmEtaEstimatorConfig {
        &self.config
    }

    /// Route URL: `{base}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=false`.
    fn build_route_url(&self, profile: &str, origin: Coord<f64>, destination: Coord<f64>) -> String {
        format!(
            "{}/route/v1/{profile}/{},{};{},{}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            origin.x,
            origin.y,
            destination.x,
            destination.y,
        )
    }

    async fn fetch_route(&self, url: &str) -> Result<Duration, EtaError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let route: RouteResponse = response
            .json()
            .await
            .map_err(|err| EtaError::ParseError {
                message: err.to_string(),
            })?;

        convert_response(route)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> EtaError {
        if error.is_timeout() {
            return EtaError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return EtaError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        EtaError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Pick the fastest route's duration out of an OSRM answer.
fn convert_response(response: RouteResponse) -> Result<Duration, EtaError> {
    if response.code == CODE_NO_ROUTE {
        return Err(EtaError::NoRoute);
    }
    if !response.is_ok() {
        return Err(EtaError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }
    let route = response.routes.first().ok_or(EtaError::NoRoute)?;
    let duration =
        Duration::try_from_secs_f64(route.duration).map_err(|err| EtaError::ParseError {
            message: format!("invalid route duration {}: {err}", route.duration),
        })?;
    debug!(
        "OSRM route: {:.0} m in {:.0} s",
        route.distance, route.duration
    );
    Ok(duration)
}

impl EtaEstimator for OsrmEtaEstimator {
    /// Fetch the fastest route for `request`.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime the runtime must be multi-threaded;
    /// a `current_thread` caller falls back to the internal runtime and may
    /// deadlock if it drives IO this request depends on.
    fn estimate(&self, request: &EtaRequest) -> Result<Duration, EtaError> {
        let profile = profile_for(request.mode).ok_or(EtaError::UnsupportedMode(request.mode))?;
        let url = self.build_route_url(profile, request.origin, request.destination);
        debug!("requesting {url}");

        let future = self.fetch_route(&url);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::osrm::Route;
    use rstest::{fixture, rstest};
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;
    use waypost_core::TransportMode;

    const UNION_STATION: Coord<f64> = Coord {
        x: -79.3806,
        y: 43.6452,
    };
    const CN_TOWER: Coord<f64> = Coord {
        x: -79.3871,
        y: 43.6426,
    };

    #[fixture]
    fn estimator() -> OsrmEtaEstimator {
        OsrmEtaEstimator::new("http://osrm.example.com/").expect("estimator should build")
    }

    fn request(mode: TransportMode) -> EtaRequest {
        EtaRequest {
            origin: UNION_STATION,
            destination: CN_TOWER,
            mode,
        }
    }

    fn response(code: &str, message: Option<&str>, durations: &[f64]) -> RouteResponse {
        RouteResponse {
            code: code.to_owned(),
            message: message.map(str::to_owned),
            routes: durations
                .iter()
                .map(|&duration| Route {
                    duration,
                    distance: 800.0,
                })
                .collect(),
        }
    }

    /// Serve one canned HTTP response on an ephemeral port.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            while reader.read_line(&mut line).expect("read request") > 2 {
                line.clear();
            }
            let mut writer = stream;
            write!(
                writer,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .expect("write response");
        });
        format!("http://{addr}")
    }

    #[rstest]
    fn route_url_uses_lon_lat_order(estimator: OsrmEtaEstimator) {
        let url = estimator.build_route_url("foot", UNION_STATION, CN_TOWER);

        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/foot/-79.3806,43.6452;-79.3871,43.6426?overview=false"
        );
    }

    #[rstest]
    fn transit_fails_without_network(estimator: OsrmEtaEstimator) {
        let err = estimator
            .estimate(&request(TransportMode::Transit))
            .expect_err("transit is unsupported");

        assert_eq!(err, EtaError::UnsupportedMode(TransportMode::Transit));
    }

    #[rstest]
    fn first_route_wins() {
        let duration = convert_response(response("Ok", None, &[420.0, 900.0])).expect("route");

        assert_eq!(duration, Duration::from_secs(420));
    }

    #[rstest]
    #[case(response("NoRoute", Some("Impossible route"), &[]))]
    #[case(response("Ok", None, &[]))]
    fn missing_route_is_no_route(#[case] answer: RouteResponse) {
        assert_eq!(convert_response(answer), Err(EtaError::NoRoute));
    }

    #[rstest]
    fn service_errors_keep_code_and_message() {
        let err = convert_response(response("InvalidQuery", Some("bad coordinates"), &[]))
            .expect_err("should fail");

        assert_eq!(
            err,
            EtaError::ServiceError {
                code: "InvalidQuery".to_owned(),
                message: "bad coordinates".to_owned(),
            }
        );
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(1e20)]
    fn invalid_durations_are_parse_errors(#[case] duration: f64) {
        let err = convert_response(response("Ok", None, &[duration])).expect_err("should fail");

        assert!(matches!(err, EtaError::ParseError { .. }), "got {err:?}");
    }

    #[rstest]
    fn estimates_against_live_endpoint() {
        let base = serve_once(
            "200 OK",
            r#"{"code":"Ok","routes":[{"duration":421.7,"distance":812.4}]}"#,
        );
        let estimator = OsrmEtaEstimator::new(base).expect("estimator should build");

        let eta = estimator
            .estimate(&request(TransportMode::Driving))
            .expect("estimate should succeed");

        assert_eq!(eta, Duration::from_secs_f64(421.7));
    }

    #[rstest]
    fn http_failures_carry_status() {
        let base = serve_once("503 Service Unavailable", "{}");
        let estimator = OsrmEtaEstimator::new(base).expect("estimator should build");

        let err = estimator
            .estimate(&request(TransportMode::Walking))
            .expect_err("estimate should fail");

        assert!(
            matches!(err, EtaError::HttpError { status: 503, .. }),
            "got {err:?}"
        );
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = OsrmEtaEstimatorConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(OsrmEtaEstimatorConfig::default().base_url, DEFAULT_BASE_URL);
    }
}
