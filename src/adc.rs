//! Analog inputs
//!
//! An ADC hands out one handle per input channel ([`OpenChannel`]),
//! each handle reads its channel as a fraction of full scale ([`AnalogChannel`]).

pub mod mcp3008;

/// One analog input line
pub trait AnalogChannel {
    /// Error raised while reading
    type Error;

    /// Current reading, normalized to `0.0..=1.0` of the input range
    fn value(&mut self) -> Result<f64, Self::Error>;
}

/// Something that hands out channel handles by index
pub trait OpenChannel {
    /// Handle type for a single channel
    type Channel: AnalogChannel;
    /// Error raised while acquiring a handle
    type Error;

    /// Acquire the handle of channel `index`
    fn open_channel(&mut self, index: u8) -> Result<Self::Channel, Self::Error>;
}
