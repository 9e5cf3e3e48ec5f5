//! MCP3008 8 channel, 10 bit SPI ADC
//!
//! One conversion is a single 3 byte full duplex transfer:
//!
//! ```text
//! MOSI: 0000_0001  S DDD_xxxx  xxxx_xxxx
//! MISO: xxxx_xxxx  xxxx_x0BB  BBBB_BBBB
//! ```
//!
//! `S` selects single-ended (1) or differential (0) input, `DDD` the channel,
//! `B` is the 10 bit result, MSB first.

use core::fmt;

use embedded_hal::spi::SpiDevice;

use crate::{adc::AnalogChannel, utils::BitOps};

/// Number of input channels
pub const CHANNEL_COUNT: u8 = 8;

/// Largest conversion result
pub const MAX_CODE: u16 = (1 << 10) - 1;

const START_BIT: u8 = 0b0000_0001;

/// How the channel index is wired to the converter input
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum InputMode {
    /// Channel against ground
    #[default]
    SingleEnded,
    /// Channel pair, `index` is IN+ of pair `(index, index ^ 1)`
    Differential,
}

/// Errors of the MCP3008 driver
#[derive(Debug)]
pub enum Error<E> {
    /// SPI bus error
    Spi(E),
    /// Channel index outside `0..CHANNEL_COUNT`
    InvalidChannel(u8),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spi(err) => write!(f, "SPI transfer failed: {err:?}"),
            Error::InvalidChannel(index) => write!(
                f,
                "channel {index} does not exist, MCP3008 has channels 0 to {}",
                CHANNEL_COUNT - 1
            ),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for Error<E> {}

/// Handle on one MCP3008 channel
///
/// The handle owns the SPI device, so each open channel is a separate device handle.
pub struct Mcp3008<Spi> {
    spi: Spi,
    channel: u8,
    mode: InputMode,
}

impl<Spi: SpiDevice> Mcp3008<Spi> {
    /// Single-ended handle on `channel`
    pub fn new(spi: Spi, channel: u8) -> Result<Self, Error<Spi::Error>> {
        Self::with_mode(spi, channel, InputMode::SingleEnded)
    }

    #[allow(missing_docs)]
    pub fn with_mode(spi: Spi, channel: u8, mode: InputMode) -> Result<Self, Error<Spi::Error>> {
        if channel >= CHANNEL_COUNT {
            return Err(Error::InvalidChannel(channel));
        }

        Ok(Self { spi, channel, mode })
    }

    /// Give the SPI device back
    pub fn release(self) -> Spi {
        self.spi
    }

    fn request(&self) -> [u8; 3] {
        let mut config = self.channel << 4;
        if self.mode == InputMode::SingleEnded {
            config.set_bit(7);
        }

        [START_BIT, config, 0x00]
    }

    /// Raw 10 bit conversion result
    pub fn read_raw(&mut self) -> Result<u16, Error<Spi::Error>> {
        let mut buf = self.request();
        self.spi.transfer_in_place(&mut buf).map_err(Error::Spi)?;

        Ok((u16::from(buf[1] & 0b11) << 8) | u16::from(buf[2]))
    }
}

impl<Spi: SpiDevice> AnalogChannel for Mcp3008<Spi> {
    type Error = Error<Spi::Error>;

    fn value(&mut self) -> Result<f64, Self::Error> {
        Ok(f64::from(self.read_raw()?) / f64::from(MAX_CODE))
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    use super::*;

    fn conversion(request: [u8; 3], response: [u8; 3]) -> Vec<SpiTransaction<u8>> {
        vec![
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(request.to_vec(), response.to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    #[test]
    fn full_scale_on_channel_5() {
        let mut spi = SpiMock::new(&conversion([0x01, 0xD0, 0x00], [0x00, 0x03, 0xFF]));

        let mut adc = Mcp3008::new(spi.clone(), 5).unwrap();
        assert_eq!(adc.value().unwrap(), 1.0);

        spi.done();
    }

    #[test]
    fn ignores_bits_above_the_result() {
        let mut spi = SpiMock::new(&conversion([0x01, 0x80, 0x00], [0xFF, 0xFE, 0x01]));

        let mut adc = Mcp3008::new(spi.clone(), 0).unwrap();
        assert_eq!(adc.read_raw().unwrap(), 0b10_0000_0001);

        spi.done();
    }

    #[test]
    fn differential_clears_the_single_bit() {
        let mut spi = SpiMock::new(&conversion([0x01, 0x30, 0x00], [0x00, 0x00, 0x00]));

        let mut adc = Mcp3008::with_mode(spi.clone(), 3, InputMode::Differential).unwrap();
        assert_eq!(adc.value().unwrap(), 0.0);

        spi.done();
    }

    #[test]
    fn channel_8_does_not_exist() {
        let mut spi: SpiMock<u8> = SpiMock::new(&[]);

        let err = Mcp3008::new(spi.clone(), 8).err().unwrap();
        assert!(matches!(err, Error::InvalidChannel(8)));
        assert_eq!(
            err.to_string(),
            "channel 8 does not exist, MCP3008 has channels 0 to 7"
        );

        spi.done();
    }
}
