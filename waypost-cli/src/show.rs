//! `show` command: select a POI and report distance and travel time.

use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypost_core::{
    CoordinatorConfig, DetailPanel, EtaCompletion, EtaDispatcher, EtaEstimator, EtaState,
    LocationProvider, LocationSource, MapView, NO_LOCATION_PLACEHOLDER, PoiCatalog,
    SelectionCoordinator, SelectionError, ThreadDispatcher, TransportMode, UserLocation,
};
use waypost_data::{OsrmEtaEstimator, OsrmEtaEstimatorConfig};

use crate::location::{FixedLocationSource, resolve_location};
use crate::{
    ARG_LATITUDE, ARG_LONGITUDE, ARG_MODE, ARG_OSRM_BASE_URL, ARG_SHOW_NAME, ARG_TIMEOUT_SECS,
    CliError, ENV_SHOW_NAME, OutputFormat, write_json, write_line,
};

/// Extra wait on top of the estimator timeout before giving up on a reply.
const REPLY_GRACE: Duration = Duration::from_secs(1);

/// CLI arguments for the `show` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Select a point of interest by name, then report the \
                 straight-line distance from your location and the travel \
                 time for the chosen mode as estimated by an OSRM server. \
                 Without a location the command behaves as if location \
                 permission was denied.",
    about = "Select a point of interest and estimate the trip there"
)]
#[ortho_config(prefix = "WAYPOST")]
pub(crate) struct ShowArgs {
    /// Name of the point of interest, e.g. "CN Tower".
    #[arg(value_name = ARG_SHOW_NAME)]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Your latitude in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Your longitude in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Travel mode: driving, walking or transit.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<String>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Seconds to wait for the routing service.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ShowArgs {
    fn into_config(self) -> Result<ShowConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ShowConfig::try_from(merged)
    }
}

/// Resolved `show` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShowConfig {
    pub(crate) name: String,
    pub(crate) location: Option<UserLocation>,
    pub(crate) mode: TransportMode,
    pub(crate) osrm_base_url: String,
    pub(crate) timeout: Duration,
}

impl TryFrom<ShowArgs> for ShowConfig {
    type Error = CliError;

    fn try_from(args: ShowArgs) -> Result<Self, Self::Error> {
        let name = args.name.ok_or(CliError::MissingArgument {
            field: ARG_SHOW_NAME,
            env: ENV_SHOW_NAME,
        })?;
        let mode = match args.mode {
            Some(text) => text.parse()?,
            None => TransportMode::default(),
        };
        let defaults = OsrmEtaEstimatorConfig::default();
        Ok(Self {
            name,
            location: resolve_location(args.latitude, args.longitude)?,
            mode,
            osrm_base_url: args.osrm_base_url.unwrap_or(defaults.base_url),
            timeout: args
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        })
    }
}

/// Estimator handed to the worker threads.
pub(crate) type BoxedEstimator = Box<dyn EtaEstimator + Send + Sync>;

/// Builds the estimator for a `show` invocation.
pub(crate) trait EstimatorBuilder {
    fn build(&self, config: &ShowConfig) -> Result<BoxedEstimator, CliError>;
}

pub(crate) struct OsrmEstimatorBuilder;

impl EstimatorBuilder for OsrmEstimatorBuilder {
    fn build(&self, config: &ShowConfig) -> Result<BoxedEstimator, CliError> {
        let estimator_config =
            OsrmEtaEstimatorConfig::new(config.osrm_base_url.clone()).with_timeout(config.timeout);
        let estimator = OsrmEtaEstimator::with_config(estimator_config).map_err(|source| {
            CliError::BuildEstimator {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(estimator))
    }
}

/// Machine-readable `show` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ShowReport {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) distance_km: Option<f64>,
    pub(crate) transport_mode: TransportMode,
    pub(crate) eta: Option<String>,
    pub(crate) eta_seconds: Option<u64>,
}

impl From<&DetailPanel> for ShowReport {
    fn from(panel: &DetailPanel) -> Self {
        Self {
            id: panel.poi.id.0,
            name: panel.poi.name.clone(),
            description: panel.poi.description.clone(),
            category: panel.poi.category.clone(),
            latitude: panel.poi.latitude(),
            longitude: panel.poi.longitude(),
            distance_km: panel.distance_km,
            transport_mode: panel.transport_mode,
            eta: panel.eta.label(),
            eta_seconds: match panel.eta {
                EtaState::Resolved(duration) => Some(duration.as_secs()),
                _ => None,
            },
        }
    }
}

pub(crate) fn run_show(
    args: ShowArgs,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_show_with(&config, &OsrmEstimatorBuilder, format, writer)
}

pub(crate) fn run_show_with(
    config: &ShowConfig,
    builder: &dyn EstimatorBuilder,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let (panel, view) = resolve_detail(config, builder)?;
    match format {
        OutputFormat::Json => write_json(writer, &ShowReport::from(&panel)),
        OutputFormat::Text => write_detail(writer, &panel, &view),
    }
}

/// Drive a coordinator through one selection and wait for its estimate.
pub(crate) fn resolve_detail(
    config: &ShowConfig,
    builder: &dyn EstimatorBuilder,
) -> Result<(DetailPanel, MapView), CliError> {
    let catalog = PoiCatalog::toronto();
    let poi_id = catalog
        .find_by_name(&config.name)
        .map(|poi| poi.id)
        .ok_or_else(|| CliError::UnknownPoi {
            name: config.name.clone(),
        })?;

    let (dispatcher, completions) = ThreadDispatcher::channel(builder.build(config)?);
    let source = FixedLocationSource::new(config.location.clone());
    let events = source.events();
    let mut coordinator = SelectionCoordinator::new(
        catalog,
        LocationProvider::new(source),
        dispatcher,
        CoordinatorConfig::default(),
    );
    coordinator.start();
    for event in events {
        coordinator.handle_location_event(event);
    }
    coordinator.set_transport_mode(config.mode);
    coordinator.select_poi(Some(poi_id))?;
    await_estimate(&mut coordinator, &completions, config.timeout.saturating_add(REPLY_GRACE));

    let panel = coordinator
        .detail_panel()
        .ok_or(SelectionError::NothingSelected)?;
    Ok((panel, coordinator.map_view()))
}

fn await_estimate<S, D>(
    coordinator: &mut SelectionCoordinator<S, D>,
    completions: &Receiver<EtaCompletion>,
    wait: Duration,
) where
    S: LocationSource,
    D: EtaDispatcher,
{
    let deadline = Instant::now().checked_add(wait);
    while coordinator.state().eta.is_pending() {
        let remaining = deadline.map_or(Duration::MAX, |at| {
            at.saturating_duration_since(Instant::now())
        });
        match completions.recv_timeout(remaining) {
            Ok(completion) => {
                if !coordinator.complete_eta(completion) {
                    info!("ignored an answer for a superseded request");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("no travel time after {}s", wait.as_secs());
                break;
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("estimate worker exited without replying");
                break;
            }
        }
    }
}

fn write_detail(
    writer: &mut dyn Write,
    panel: &DetailPanel,
    view: &MapView,
) -> Result<(), CliError> {
    write_line(writer, &panel.poi.name)?;
    write_line(writer, &panel.poi.description)?;
    write_line(writer, &panel.category_line())?;
    match (view, panel.distance_line()) {
        (MapView::Map { .. }, Some(distance)) => write_line(writer, &distance)?,
        _ => write_line(writer, NO_LOCATION_PLACEHOLDER)?,
    }
    write_line(writer, &format!("Mode: {}", panel.transport_mode))?;
    if let Some(eta) = panel.eta_line() {
        write_line(writer, &eta)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ShowConfig, CliError> {
    let merged = ShowArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ShowConfig::try_from(merged)
}
