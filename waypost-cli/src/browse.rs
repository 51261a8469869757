//! `categories` and `list` commands.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypost_core::{ALL_CATEGORIES, PoiCatalog, PointOfInterest, UserLocation, distance_km};

use crate::location::resolve_location;
use crate::{
    ARG_CATEGORY, ARG_LATITUDE, ARG_LONGITUDE, ARG_QUERY, CliError, OutputFormat, write_json,
    write_line,
};

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List the built-in points of interest whose names contain \
                 the query and whose category matches the filter. With a \
                 location, each row also shows the straight-line distance.",
    about = "List points of interest passing the filters"
)]
#[ortho_config(prefix = "WAYPOST")]
pub(crate) struct ListArgs {
    /// Case-insensitive text the POI name must contain.
    #[arg(long = ARG_QUERY, value_name = "text")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Category to keep, "All" for every category.
    #[arg(long = ARG_CATEGORY, value_name = "name")]
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Your latitude in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Your longitude in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
}

impl ListArgs {
    fn into_config(self) -> Result<ListConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ListConfig::try_from(merged)
    }
}

/// Resolved `list` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListConfig {
    pub(crate) query: String,
    pub(crate) category: String,
    pub(crate) location: Option<UserLocation>,
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            query: args.query.unwrap_or_default(),
            category: args
                .category
                .unwrap_or_else(|| ALL_CATEGORIES.to_owned()),
            location: resolve_location(args.latitude, args.longitude)?,
        })
    }
}

/// One row of `list` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PoiRow {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) distance_km: Option<f64>,
}

impl PoiRow {
    fn new(poi: &PointOfInterest, here: Option<&UserLocation>) -> Self {
        Self {
            id: poi.id.0,
            name: poi.name.clone(),
            category: poi.category.clone(),
            latitude: poi.latitude(),
            longitude: poi.longitude(),
            distance_km: here.map(|reading| distance_km(reading.location, poi.location)),
        }
    }

    fn to_text(&self) -> String {
        let mut line = format!("{:>3}  {} [{}]", self.id, self.name, self.category);
        if let Some(km) = self.distance_km {
            line.push_str(&format!("  {km:.2} km"));
        }
        line
    }
}

pub(crate) fn run_categories(format: OutputFormat, writer: &mut dyn Write) -> Result<(), CliError> {
    let categories = PoiCatalog::toronto().categories();
    match format {
        OutputFormat::Json => write_json(writer, &categories),
        OutputFormat::Text => categories
            .iter()
            .try_for_each(|category| write_line(writer, category)),
    }
}

pub(crate) fn run_list(
    args: ListArgs,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_list_with(&config, &PoiCatalog::toronto(), format, writer)
}

pub(crate) fn run_list_with(
    config: &ListConfig,
    catalog: &PoiCatalog,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let rows = list_rows(config, catalog)?;
    match format {
        OutputFormat::Json => write_json(writer, &rows),
        OutputFormat::Text if rows.is_empty() => {
            write_line(writer, "no points of interest match the filters")
        }
        OutputFormat::Text => rows
            .iter()
            .try_for_each(|row| write_line(writer, &row.to_text())),
    }
}

/// Filter the catalogue, rejecting categories it does not contain.
pub(crate) fn list_rows(config: &ListConfig, catalog: &PoiCatalog) -> Result<Vec<PoiRow>, CliError> {
    let categories = catalog.categories();
    if !categories.contains(&config.category) {
        return Err(CliError::UnknownCategory {
            category: config.category.clone(),
            known: categories.join(", "),
        });
    }
    Ok(catalog
        .filter(&config.query, &config.category)
        .into_iter()
        .map(|poi| PoiRow::new(poi, config.location.as_ref()))
        .collect())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ListConfig, CliError> {
    let merged = ListArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ListConfig::try_from(merged)
}
