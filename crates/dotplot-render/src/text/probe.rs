//! Host-backed label measurement.
//!
//! A host (a DOM, a retained-mode canvas, a font shaper) measures text by attaching a hidden,
//! non-wrapping probe element, reading its client box and detaching it again. The probe must
//! never outlive a single [`TextMeasurer::measure`] call, so detaching is tied to a drop guard.

use super::{TextMeasurer, TextMetrics, TextStyle};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeBox {
    pub width: f64,
    pub height: f64,
}

pub trait MeasurementHost {
    type Probe;

    /// Attaches an invisible probe holding `text` rendered with `style`.
    fn create_probe(&self, text: &str, style: &TextStyle) -> Result<Self::Probe>;

    /// Reads the laid-out client box of a live probe.
    fn client_box(&self, probe: &Self::Probe) -> Result<ProbeBox>;

    /// Detaches the probe. Called exactly once per successfully created probe.
    fn remove_probe(&self, probe: Self::Probe);
}

struct ProbeGuard<'a, H: MeasurementHost> {
    host: &'a H,
    probe: Option<H::Probe>,
}

impl<'a, H: MeasurementHost> ProbeGuard<'a, H> {
    fn attach(host: &'a H, text: &str, style: &TextStyle) -> Result<Self> {
        let probe = host.create_probe(text, style)?;
        Ok(Self {
            host,
            probe: Some(probe),
        })
    }

    fn client_box(&self) -> Result<ProbeBox> {
        match self.probe.as_ref() {
            Some(p) => self.host.client_box(p),
            None => Err(crate::Error::measurement("probe already detached")),
        }
    }
}

impl<H: MeasurementHost> Drop for ProbeGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(p) = self.probe.take() {
            self.host.remove_probe(p);
        }
    }
}

/// [`TextMeasurer`] backed by a [`MeasurementHost`].
///
/// Client widths are whole layout pixels; `allowance` (1px by default) is added so the label
/// never clips against the axis.
#[derive(Debug, Clone)]
pub struct ProbeTextMeasurer<H> {
    host: H,
    pub allowance: f64,
}

impl<H: MeasurementHost> ProbeTextMeasurer<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            allowance: 1.0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: MeasurementHost> TextMeasurer for ProbeTextMeasurer<H> {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics> {
        let guard = ProbeGuard::attach(&self.host, text, style)?;
        let b = guard.client_box()?;
        drop(guard);

        if !b.width.is_finite() || !b.height.is_finite() {
            return Err(crate::Error::measurement(format!(
                "host reported a non-finite box for {text:?}: {}x{}",
                b.width, b.height
            )));
        }
        tracing::trace!(text, width = b.width, height = b.height, "probe measured");
        Ok(TextMetrics {
            width: b.width + self.allowance,
            height: b.height,
            line_count: 1,
        })
    }
}
