//! Linear and band scales with d3-compatible numerics.

use indexmap::IndexSet;

/// `(i1, i2, inc)` for the tick sequence covering `[start, stop]`. A negative `inc` means the
/// step is `1 / -inc`, which keeps fractional steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    if !(count > 0.0) {
        return None;
    }

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step == 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (i1, i2, inc) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round() as i64;
        let mut i2 = (stop * inc).round() as i64;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round() as i64;
        let mut i2 = (stop / inc).round() as i64;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        (i1, i2, inc)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    if !inc.is_finite() || inc == 0.0 {
        return None;
    }

    Some((i1, i2, inc))
}

/// Signed tick increment in the `tick_spec` encoding, or `None` when the span is degenerate.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    if !start.is_finite() || !stop.is_finite() {
        return None;
    }
    tick_spec(start, stop, count as f64).map(|(_, _, inc)| inc)
}

/// Upper bound on the number of values [`ticks`] will generate.
pub const MAX_TICKS: usize = 10_000;

/// Round tick values covering `[start, stop]`, in the direction of the arguments. Sequences
/// longer than [`MAX_TICKS`] yield no ticks.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let count = count as f64;
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (a, b) = if reverse {
        (stop, start)
    } else {
        (start, stop)
    };
    let Some((i1, i2, inc)) = tick_spec(a, b, count) else {
        return Vec::new();
    };
    let n = match i2.checked_sub(i1).and_then(|d| d.checked_add(1)) {
        Some(n) if n > 0 && n as u64 <= MAX_TICKS as u64 => n as usize,
        _ => return Vec::new(),
    };
    let value = |i: i64| {
        if inc < 0.0 {
            i as f64 / -inc
        } else {
            i as f64 * inc
        }
    };

    if reverse {
        (0..n).map(|i| value(i2 - i as i64)).collect()
    } else {
        (0..n).map(|i| value(i1 + i as i64)).collect()
    }
}

/// Formats a tick value the way JavaScript prints numbers.
pub fn format_tick(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Extends the domain to round tick boundaries. The domain only changes once the tick
    /// increment reaches a fixed point, within at most ten refinements.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reverse = d1 < d0;
        let (mut start, mut stop) = if reverse { (d1, d0) } else { (d0, d1) };

        let mut prestep: Option<f64> = None;
        for _ in 0..10 {
            let Some(step) = tick_increment(start, stop, count) else {
                return self;
            };
            if prestep == Some(step) {
                self.domain = if reverse { (stop, start) } else { (start, stop) };
                return self;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            prestep = Some(step);
        }
        // No fixed point within ten refinements: the domain stays as given.
        self
    }

    pub fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return r0 + (r1 - r0) * 0.5;
        }
        let t = (v - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Categorical scale with evenly spaced slots.
///
/// The domain keeps first occurrences only, so repeated names share a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Sets inner and outer padding together; inner padding is capped at one step.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    fn ordered_range(&self) -> (f64, f64, bool) {
        let (r0, r1) = self.range;
        if r1 < r0 { (r1, r0, true) } else { (r0, r1, false) }
    }

    pub fn step(&self) -> f64 {
        let (start, stop, _) = self.ordered_range();
        let n = self.domain.len() as f64;
        (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    pub fn position(&self, name: &str) -> Option<f64> {
        let idx = self.domain.get_index_of(name)?;
        let n = self.domain.len();
        let (start, stop, reverse) = self.ordered_range();
        let step = self.step();
        let first = start + (stop - start - step * (n as f64 - self.padding_inner)) * self.align;
        let slot = if reverse { n - 1 - idx } else { idx };
        Some(first + step * slot as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_match_d3_for_common_spans() {
        assert_eq!(ticks(0.0, 1.0, 10).len(), 11);
        assert_eq!(ticks(0.0, 1.0, 10)[3], 0.3);
        assert_eq!(
            ticks(-2.0, 4.0, 10),
            vec![-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]
        );
        assert_eq!(ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
        assert_eq!(ticks(1.0, 0.0, 2), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new((0.0, 0.97), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (0.0, 1.0));

        let s = LinearScale::new((-2.0, 4.0), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (-2.0, 4.0));

        let s = LinearScale::new((-13.0, 87.0), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (-20.0, 90.0));

        let s = LinearScale::new((0.0, 0.0), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (0.0, 0.0));
    }

    #[test]
    fn nice_keeps_domain_when_refinement_does_not_settle() {
        // The first refinement rounds the upper end past f64::MAX; no increment exists for the
        // overflowed span, so the input domain is kept.
        let s = LinearScale::new((0.0, f64::MAX), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (0.0, f64::MAX));

        let s = LinearScale::new((0.0, f64::INFINITY), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (0.0, f64::INFINITY));
    }

    #[test]
    fn oversized_tick_requests_yield_nothing() {
        assert!(ticks(0.0, 1.0, 1_000_000_000_000).is_empty());
        assert!(ticks(-2.0, 4.0, usize::MAX).is_empty());
        assert_eq!(ticks(0.0, 1.0, 1000).len(), 1001);
    }

    #[test]
    fn linear_scale_maps_and_handles_degenerate_domain() {
        let s = LinearScale::new((-2.0, 4.0), (0.0, 600.0));
        assert_eq!(s.scale(-2.0), 0.0);
        assert_eq!(s.scale(1.0), 300.0);
        assert_eq!(s.scale(4.0), 600.0);

        let flat = LinearScale::new((0.0, 0.0), (0.0, 600.0));
        assert_eq!(flat.scale(0.0), 300.0);
        assert_eq!(flat.scale(42.0), 300.0);
    }

    #[test]
    fn linear_scale_is_monotonic() {
        let s = LinearScale::new((-7.3, 12.9), (0.0, 333.0)).nice(10);
        let mut prev = f64::NEG_INFINITY;
        for i in 0..=200 {
            let v = -7.3 + (12.9 + 7.3) * (i as f64) / 200.0;
            let x = s.scale(v);
            assert!(x >= prev, "scale({v}) = {x} < {prev}");
            prev = x;
        }
    }

    #[test]
    fn band_with_full_padding_spaces_rows_evenly() {
        let s = BandScale::new(["a", "b", "c"], (0.0, 100.0)).padding(1.0);
        assert_eq!(s.step(), 25.0);
        assert_eq!(s.bandwidth(), 0.0);
        assert_eq!(s.position("a"), Some(25.0));
        assert_eq!(s.position("b"), Some(50.0));
        assert_eq!(s.position("c"), Some(75.0));
        assert_eq!(s.position("missing"), None);
    }

    #[test]
    fn band_collapses_duplicate_names_to_first_slot() {
        let s = BandScale::new(["a", "b", "a"], (0.0, 90.0)).padding(1.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s.position("a"), Some(30.0));
        assert_eq!(s.position("b"), Some(60.0));
    }

    #[test]
    fn band_handles_reversed_and_empty_ranges() {
        let s = BandScale::new(["a", "b"], (90.0, 0.0)).padding(1.0);
        assert_eq!(s.position("a"), Some(60.0));
        assert_eq!(s.position("b"), Some(30.0));

        let s = BandScale::new(Vec::<String>::new(), (0.0, 0.0)).padding(1.0);
        assert!(s.is_empty());
        assert_eq!(s.position("a"), None);
    }

    #[test]
    fn tick_labels_print_like_javascript() {
        assert_eq!(format_tick(1.0), "1");
        assert_eq!(format_tick(-0.5), "-0.5");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(0.30000000000000004), "0.30000000000000004");
    }
}
