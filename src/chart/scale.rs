//! Scales mapping data values onto canvas pixels.

/// Half-width used when a domain collapses to a single value.
const UNIT_HALF_SPAN: f64 = 1.0;

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Step between "nice" ticks covering `[start, stop]` with roughly `count` ticks.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let span = stop - start;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return 0.0;
    }
    let step = span / count as f64;
    let power = step.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = step / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Axis label for a tick value: integers without decimals, others to two places.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Continuous linear scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Build a scale. A zero-width or non-finite domain collapses to a unit span.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain: collapse_span(domain),
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Extend the domain outwards to round tick values.
    pub fn nice(mut self) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_increment(start, stop, 10);
            if step == 0.0 || step == previous {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            previous = step;
        }
        self.domain = if reversed {
            (stop, start)
        } else {
            (start, stop)
        };
        self
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Tick values at nice steps inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let step = tick_increment(lo, hi, count);
        if step == 0.0 {
            return vec![lo];
        }
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn collapse_span((d0, d1): (f64, f64)) -> (f64, f64) {
    if !d0.is_finite() || !d1.is_finite() {
        return (0.0, 1.0);
    }
    if (d1 - d0).abs() < f64::EPSILON {
        return (d0 - UNIT_HALF_SPAN, d0 + UNIT_HALF_SPAN);
    }
    (d0, d1)
}

/// Ordinal band scale with equal inner and outer padding.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            domain,
            range,
            padding: padding.clamp(0.0, 1.0),
        }
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        (r1 - r0) / (n - self.padding + 2.0 * self.padding).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Left edge of the band at `index`.
    pub fn position_at(&self, index: usize) -> Option<f64> {
        if index >= self.domain.len() {
            return None;
        }
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let step = self.step();
        let start = r0 + (r1 - r0 - step * (n - self.padding)) * 0.5;
        Some(start + step * index as f64)
    }

    /// Left edge of the band for `label`.
    pub fn position(&self, label: &str) -> Option<f64> {
        let index = self.domain.iter().position(|d| d == label)?;
        self.position_at(index)
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Continuous time scale over millisecond timestamps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeScale {
    domain: (i64, i64),
    range: (f64, f64),
}

impl TimeScale {
    /// A zero-width domain is widened by one day on each side.
    pub fn new(domain: (i64, i64), range: (f64, f64)) -> Self {
        let domain = if domain.0 == domain.1 {
            (domain.0 - MS_PER_DAY, domain.1 + MS_PER_DAY)
        } else {
            domain
        };
        Self { domain, range }
    }

    pub fn domain(&self) -> (i64, i64) {
        self.domain
    }

    pub fn scale(&self, t: i64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (t - d0) as f64 / (d1 - d0) as f64 * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> i64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + ((pixel - r0) / (r1 - r0) * (d1 - d0) as f64).round() as i64
    }

    /// `count` evenly spaced timestamps from the start to the end of the domain.
    pub fn ticks(&self, count: usize) -> Vec<i64> {
        let (d0, d1) = self.domain;
        match count {
            0 => Vec::new(),
            1 => vec![d0],
            _ => (0..count)
                .map(|i| d0 + ((d1 - d0) as f64 * i as f64 / (count - 1) as f64).round() as i64)
                .collect(),
        }
    }
}
