//! Board wiring and fixed parameters of both tools
//!
//! Pin numbers are BCM GPIO numbers, which are the line offsets on `/dev/gpiochip0`.

use core::ops::Range;

use crate::{lcd::Geometry, sender::BacklightPolarity};

/// GPIO character device the LCD pins live on
pub const GPIO_CHIP: &str = "/dev/gpiochip0";

/// Label shown for the requested lines in `gpioinfo`
pub const GPIO_CONSUMER: &str = "chardisplay";

/// GPIO lines the character LCD is wired to
///
/// RW of the LCD is tied to ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LcdWiring {
    /// register select
    pub rs: u32,
    /// enable
    pub en: u32,
    #[allow(missing_docs)]
    pub d4: u32,
    #[allow(missing_docs)]
    pub d5: u32,
    #[allow(missing_docs)]
    pub d6: u32,
    #[allow(missing_docs)]
    pub d7: u32,
    /// backlight switch
    pub backlight: u32,
    #[allow(missing_docs)]
    pub backlight_polarity: BacklightPolarity,
}

#[allow(missing_docs)]
pub const LCD_WIRING: LcdWiring = LcdWiring {
    rs: 21,
    en: 20,
    d4: 26,
    d5: 19,
    d6: 13,
    d7: 6,
    backlight: 16,
    backlight_polarity: BacklightPolarity::ActiveLow,
};

/// 8 columns x 2 rows
pub const LCD_GEOMETRY: Geometry = Geometry {
    columns: 8,
    rows: 2,
};

/// Where and how the ADC is sampled
#[derive(Clone, Debug, PartialEq)]
pub struct AdcConfig {
    /// spidev node the MCP3008 is on (SPI0, CE0)
    pub spi_device: &'static str,
    #[allow(missing_docs)]
    pub max_speed_hz: u32,
    /// Channels sampled, in order
    pub channels: Range<u8>,
    /// Factor applied to each normalized reading
    pub scale: f64,
}

// channel 7 is not sampled
#[allow(missing_docs)]
pub const ADC: AdcConfig = AdcConfig {
    spi_device: "/dev/spidev0.0",
    max_speed_hz: 1_000_000,
    channels: 0..7,
    scale: 100.0,
};
