use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};

use crate::error::Result;

/// Each tick produces one event consisting of key-value-pairs.
/// This enum specifies all allowed keys and thus the columns of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatParameter {
    /// Simulated tick the row describes.
    Tick,

    /// Requests waiting after the scheduling pass.
    QueueLength,

    /// Requests that arrived during this tick.
    Arrived,

    /// Requests placed during this tick.
    Placed,

    /// Whether the pass stopped at an unplaceable head request.
    Blocked,

    TotalCapacity,

    /// Spare units over all nodes after the pass.
    SpareUnits,

    /// Reserved units divided by total capacity after the pass.
    Utilization,
}

impl StatParameter {
    /// Column order of the CSV output.
    pub const ALL: [StatParameter; 8] = [
        StatParameter::Tick,
        StatParameter::QueueLength,
        StatParameter::Arrived,
        StatParameter::Placed,
        StatParameter::Blocked,
        StatParameter::TotalCapacity,
        StatParameter::SpareUnits,
        StatParameter::Utilization,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            StatParameter::Tick => "Tick",
            StatParameter::QueueLength => "QueueLength",
            StatParameter::Arrived => "Arrived",
            StatParameter::Placed => "Placed",
            StatParameter::Blocked => "Blocked",
            StatParameter::TotalCapacity => "TotalCapacity",
            StatParameter::SpareUnits => "SpareUnits",
            StatParameter::Utilization => "Utilization",
        }
    }
}

/// Values are stored in their native format and only formatted when written.
/// Every counted column is unsigned, so integers keep the full `u64` range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    UInteger(u64),
    Float(f64),
    Bool(bool),
}

impl From<u64> for StatValue {
    fn from(v: u64) -> Self {
        StatValue::UInteger(v)
    }
}

impl From<usize> for StatValue {
    fn from(v: usize) -> Self {
        StatValue::UInteger(v as u64)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl From<bool> for StatValue {
    fn from(v: bool) -> Self {
        StatValue::Bool(v)
    }
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatValue::UInteger(i) => write!(f, "{}", i),
            StatValue::Float(v) => write!(f, "{:.4}", v),
            StatValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticEvent {
    data: HashMap<StatParameter, StatValue>,
}

impl StatisticEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<StatValue>>(&mut self, param: StatParameter, value: V) -> &mut Self {
        self.data.insert(param, value.into());
        self
    }

    /// Row in column order, `NA` for unset parameters.
    fn to_row(&self) -> Vec<String> {
        StatParameter::ALL
            .iter()
            .map(|param| match self.data.get(param) {
                Some(value) => value.to_string(),
                None => "NA".to_string(),
            })
            .collect()
    }
}

/// Writes one `;`-delimited CSV row per recorded event.
pub struct StatsRecorder {
    writer: csv::Writer<Box<dyn Write>>,
}

impl std::fmt::Debug for StatsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsRecorder").finish_non_exhaustive()
    }
}

impl StatsRecorder {
    /// Opens `filename` for writing, or stdout if no file is given, and writes the header.
    pub fn create(filename: Option<&str>) -> Result<Self> {
        let writer: Box<dyn Write> = match filename {
            Some(f) => Box::new(File::create(f)?),
            None => Box::new(io::stdout()),
        };

        Self::from_writer(writer)
    }

    pub fn from_writer(writer: Box<dyn Write>) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
        writer.write_record(StatParameter::ALL.iter().map(|p| p.header()))?;

        Ok(Self { writer })
    }

    pub fn record(&mut self, event: &StatisticEvent) -> Result<()> {
        self.writer.write_record(event.to_row())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
