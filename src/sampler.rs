//! ADC Sampler: read a range of channels, scale them, print them as one line

use core::{fmt, ops::Range};

use log::trace;

use crate::adc::{AnalogChannel, OpenChannel};

/// A channel that could not be sampled
#[derive(Debug)]
pub enum SampleError<OpenErr, ReadErr> {
    /// The channel handle could not be acquired
    Open {
        #[allow(missing_docs)]
        channel: u8,
        #[allow(missing_docs)]
        source: OpenErr,
    },
    /// The handle was acquired but the reading failed
    Read {
        #[allow(missing_docs)]
        channel: u8,
        #[allow(missing_docs)]
        source: ReadErr,
    },
}

impl<OpenErr: fmt::Debug, ReadErr: fmt::Debug> fmt::Display for SampleError<OpenErr, ReadErr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::Open { channel, source } => {
                write!(f, "cannot open ADC channel {channel}: {source:?}")
            }
            SampleError::Read { channel, source } => {
                write!(f, "cannot read ADC channel {channel}: {source:?}")
            }
        }
    }
}

impl<OpenErr: fmt::Debug, ReadErr: fmt::Debug> std::error::Error
    for SampleError<OpenErr, ReadErr>
{
}

#[allow(missing_docs)]
pub type SampleResult<O> = Result<
    Vec<f64>,
    SampleError<<O as OpenChannel>::Error, <<O as OpenChannel>::Channel as AnalogChannel>::Error>,
>;

/// Open each channel in turn, read it and multiply by `scale`
///
/// Each handle is dropped before the next channel is opened. The first failure
/// aborts the whole run, no partial result is returned.
pub fn sample<O: OpenChannel>(adc: &mut O, channels: Range<u8>, scale: f64) -> SampleResult<O> {
    let mut values = Vec::with_capacity(channels.len());

    for channel in channels {
        let mut handle = match adc.open_channel(channel) {
            Ok(handle) => handle,
            Err(source) => return Err(SampleError::Open { channel, source }),
        };
        let value = match handle.value() {
            Ok(value) => value,
            Err(source) => return Err(SampleError::Read { channel, source }),
        };

        trace!("channel {channel}: {value}");
        values.push(value * scale);
    }

    Ok(values)
}

/// Tab separated values, newline terminated
///
/// Values are printed in their shortest round-trip form, always with a
/// fractional part (`50.0`, not `50`).
pub fn format_line(values: &[f64]) -> String {
    let mut line = values
        .iter()
        .map(|value| format!("{value:?}"))
        .collect::<Vec<_>>()
        .join("\t");
    line.push('\n');
    line
}
