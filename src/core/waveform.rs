//! Waveform data sources.
//!
//! The engine never owns sample storage; hosts hand it anything implementing
//! [`Waveform`]. Axis ranges only need sample extents and lengths, so the
//! trait surface is deliberately small.

/// A uniformly sampled signal.
pub trait Waveform {
    /// Number of samples.
    fn len(&self) -> usize;

    /// Sample at index `i`. Callers keep `i < len()`.
    fn value(&self, i: usize) -> f64;

    /// Samples per second.
    fn sampling_rate(&self) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration of the signal in seconds.
    fn duration(&self) -> f64 {
        if self.sampling_rate() > 0.0 {
            self.len() as f64 / self.sampling_rate()
        } else {
            0.0
        }
    }

    /// `(min, max)` over all samples, `(0.0, 0.0)` when empty.
    ///
    /// Non-finite samples are skipped so one bad sample cannot poison the
    /// axis range.
    fn extents(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for i in 0..self.len() {
            let v = self.value(i);
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max { (0.0, 0.0) } else { (min, max) }
    }
}

/// In-memory waveform backed by a sample slice.
#[derive(Debug, Clone)]
pub struct SliceWaveform<'a> {
    samples: &'a [f64],
    sampling_rate: f64,
}

impl<'a> SliceWaveform<'a> {
    #[must_use]
    pub fn new(samples: &'a [f64], sampling_rate: f64) -> Self {
        Self {
            samples,
            sampling_rate,
        }
    }
}

impl Waveform for SliceWaveform<'_> {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn value(&self, i: usize) -> f64 {
        self.samples[i]
    }

    fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }
}
