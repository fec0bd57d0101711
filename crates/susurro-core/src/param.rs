//! Parameter smoothing for zipper-free changes.
//!
//! Control-side parameter writes (volume, pan, cutoff) arrive at arbitrary
//! times; applying them instantly produces audible "zipper noise". A
//! [`SmoothedParam`] exponentially approaches its target so every change
//! lands click-free.

use libm::expf;

/// A parameter with built-in exponential smoothing.
///
/// Uses a one-pole lowpass on the value: natural-sounding transitions for
/// gain-like parameters.
///
/// # Usage
///
/// ```rust
/// use susurro_core::SmoothedParam;
///
/// let mut gain = SmoothedParam::standard(1.0, 48000.0);
/// gain.set_target(0.5);
///
/// // In the audio callback, advance once per sample
/// for _ in 0..480 {
///     let g = gain.advance();
///     // use g for processing...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value we're smoothing towards
    target: f32,
    /// Smoothing coefficient (1 = instant, ~0 = very slow)
    coeff: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Smoothing time in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a smoothed parameter with explicit configuration.
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate,
            smoothing_time_ms,
        };
        param.recalculate_coeff();
        param
    }

    /// Standard smoothing: 10 ms time constant. Good for gain and pan.
    pub fn standard(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, 10.0)
    }

    /// Slow smoothing: 50 ms time constant. Good for filter cutoff sweeps.
    pub fn slow(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, 50.0)
    }

    /// Set the target value (the parameter smooths towards this).
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and snap to it immediately (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Get the next smoothed value (advances by one sample).
    #[inline]
    pub fn advance(&mut self) -> f32 {
        // One-pole lowpass: y[n] = y[n-1] + coeff * (target - y[n-1])
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Get the current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get the target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if the parameter has reached its target (within epsilon).
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Skip ahead to the target value immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Recalculate the one-pole coefficient from sample rate and time.
    ///
    /// The time constant tau (time to reach 63.2% of target) relates to the
    /// coefficient by `coeff = 1 - exp(-1 / (tau * sample_rate))` with
    /// `tau = smoothing_time_ms / 1000`. After 5*tau the parameter is at
    /// 99.3% of target -- settled for audio purposes. A smoothing time of 0
    /// gives instant response.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = self.smoothing_time_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}
