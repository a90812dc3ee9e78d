//! Grid series and positional alignment into report rows.

use crate::nws::GridSeries;

use super::interval::Interval;

/// One sample of a grid series: its valid interval and optional value.
#[derive(Debug, Clone)]
pub struct TimedSample {
    pub interval: Interval,
    pub value: Option<f64>,
}

/// A grid series with parsed intervals.
#[derive(Debug, Clone, Default)]
pub struct Series {
    pub uom: Option<String>,
    pub samples: Vec<TimedSample>,
}

impl Series {
    /// Build from a raw grid series, parsing each `validTime` token. An
    /// absent series becomes an empty one.
    pub fn from_grid(raw: Option<&GridSeries>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        Self {
            uom: raw.uom.clone(),
            samples: raw
                .values
                .iter()
                .map(|sample| TimedSample {
                    interval: Interval::parse(&sample.valid_time),
                    value: sample.value,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Value at a position, `None` when out of range or the sample is null.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.samples.get(index).and_then(|sample| sample.value)
    }
}

/// One aligned row of the observing report.
#[derive(Debug, Clone)]
pub struct ObservingRow {
    pub interval: Interval,
    pub sky_cover: Option<f64>,
    pub precipitation: Option<f64>,
    pub visibility: Option<f64>,
}

/// Align the three series into at most `horizon` rows.
///
/// Alignment is positional: row `i` takes sample `i` of each series, keyed
/// off the sky cover timeline. NWS grid series can run at different cadences
/// (a sample may cover six hours while another covers one), in which case
/// same-index samples describe different spans; the row still reports them
/// together. Row count is `min(horizon, sky samples)`.
pub fn align(sky: &Series, precipitation: &Series, visibility: &Series, horizon: usize) -> Vec<ObservingRow> {
    sky.samples
        .iter()
        .take(horizon)
        .enumerate()
        .map(|(index, sample)| ObservingRow {
            interval: sample.interval.clone(),
            sky_cover: sample.value,
            precipitation: precipitation.value_at(index),
            visibility: visibility.value_at(index),
        })
        .collect()
}
