//! Turns a parsed result file into `(params, records)` or a reject reason.
//!
//! Two producer layouts are accepted:
//! - scan/extract output: `{ "config": {...}, "traders": [...] }`
//! - analysis output:     `{ "config": {...}, "results": [...] }`
//!
//! `traders` wins when both lists are present. Anything else is rejected as
//! a whole; individual entries are not validated here.

use serde_json::Value;
use thiserror::Error;

use common::{StrategyParams, TraderRecord, DEFAULT_MULTIPLIER};

/// Layout of a result file, decided before any config or record is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    ListOfTraders(&'a [Value]),
    ListOfResults(&'a [Value]),
    Unrecognized,
}

/// `Shape` without the borrowed entries, kept on the normalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    ListOfTraders,
    ListOfResults,
}

/// Why a file contributed nothing to the aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reject {
    #[error("file could not be read")]
    Unreadable,
    #[error("not valid JSON")]
    InvalidJson,
    #[error("neither a `traders` nor a `results` list")]
    UnrecognizedShape,
    #[error("missing `config` object")]
    MissingConfig,
    #[error("`config.historyDays` missing or not a positive integer")]
    MissingHistoryDays,
}

/// A file that qualified for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFile {
    pub shape: ShapeKind,
    pub params: StrategyParams,
    pub records: Vec<TraderRecord>,
}

pub fn classify(value: &Value) -> Shape<'_> {
    if let Some(list) = value.get("traders").and_then(Value::as_array) {
        Shape::ListOfTraders(list)
    } else if let Some(list) = value.get("results").and_then(Value::as_array) {
        Shape::ListOfResults(list)
    } else {
        Shape::Unrecognized
    }
}

pub fn normalize(value: &Value) -> Result<NormalizedFile, Reject> {
    let (shape, entries) = match classify(value) {
        Shape::ListOfTraders(list) => (ShapeKind::ListOfTraders, list),
        Shape::ListOfResults(list) => (ShapeKind::ListOfResults, list),
        Shape::Unrecognized => return Err(Reject::UnrecognizedShape),
    };

    let config = value
        .get("config")
        .filter(|c| c.is_object())
        .ok_or(Reject::MissingConfig)?;
    let params = parse_params(config)?;

    Ok(NormalizedFile {
        shape,
        params,
        records: entries.iter().map(TraderRecord::from_value).collect(),
    })
}

pub fn normalize_str(text: &str) -> Result<NormalizedFile, Reject> {
    let value: Value = serde_json::from_str(text).map_err(|_| Reject::InvalidJson)?;
    normalize(&value)
}

fn parse_params(config: &Value) -> Result<StrategyParams, Reject> {
    let history_days = config
        .get("historyDays")
        .and_then(Value::as_u64)
        .filter(|&d| d > 0)
        .and_then(|d| u32::try_from(d).ok())
        .ok_or(Reject::MissingHistoryDays)?;

    // A non-numeric or non-positive multiplier counts as absent.
    let multiplier = config
        .get("multiplier")
        .and_then(Value::as_f64)
        .filter(|m| *m > 0.0)
        .unwrap_or(DEFAULT_MULTIPLIER);

    Ok(StrategyParams {
        history_days,
        multiplier,
        min_order_size: config.get("minOrderSize").and_then(Value::as_f64),
        starting_capital: config.get("startingCapital").and_then(Value::as_f64),
    })
}
