/// One point of the speed graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub t: f64,
    pub wpm: u32,
}

impl HistorySample {
    pub fn new(t: f64, wpm: u32) -> Self {
        Self { t, wpm }
    }
}

impl From<HistorySample> for (f64, f64) {
    fn from(p: HistorySample) -> Self {
        (p.t, p.wpm as f64)
    }
}

/// Append-only series of samples, strictly increasing in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryBuffer {
    samples: Vec<HistorySample>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the buffer for a test of `duration_secs` sampled every `interval_secs`.
    pub fn with_expected(duration_secs: f64, interval_secs: f64) -> Self {
        let expected = if interval_secs > 0.0 && duration_secs.is_finite() {
            (duration_secs / interval_secs).ceil().max(0.0) as usize
        } else {
            0
        };
        Self {
            samples: Vec::with_capacity(expected),
        }
    }

    /// Appends a sample. Samples not strictly later than the last one are dropped.
    pub fn record(&mut self, elapsed_secs: f64, wpm: u32) -> bool {
        if !elapsed_secs.is_finite() {
            return false;
        }
        if let Some(last) = self.samples.last() {
            if elapsed_secs <= last.t {
                return false;
            }
        }
        self.samples.push(HistorySample::new(elapsed_secs, wpm));
        true
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&HistorySample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Points in the `(seconds, wpm)` shape the chart widget wants.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|&s| s.into()).collect()
    }
}
