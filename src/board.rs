//! Raspberry Pi glue: the peripherals of both tools on Linux device nodes

use std::fmt::Debug;

use anyhow::{anyhow, Context, Result};
use linux_embedded_hal::{
    gpio_cdev::{Chip, LineRequestFlags},
    spidev::{SpiModeFlags, SpidevOptions},
    CdevPin, Delay, SpidevDevice,
};
use log::debug;

use crate::{
    adc::{mcp3008::Mcp3008, OpenChannel},
    config::{AdcConfig, LcdWiring},
    lcd::{Config, Geometry, Lcd},
    sender::ParallelSender,
};

/// The LCD on GPIO character device lines
pub type BoardLcd = Lcd<ParallelSender<CdevPin, CdevPin>, Delay>;

fn hardware<E: Debug>(what: String) -> impl FnOnce(E) -> anyhow::Error {
    move |err| anyhow!("{what}: {err:?}")
}

// lines start low, which is also "backlight on" for the active low switch
fn output_line(chip: &mut Chip, offset: u32, consumer: &str) -> Result<CdevPin> {
    let handle = chip
        .get_line(offset)
        .and_then(|line| line.request(LineRequestFlags::OUTPUT, 0, consumer))
        .map_err(hardware(format!("cannot request GPIO {offset} as output")))?;

    CdevPin::new(handle).map_err(hardware(format!("cannot use GPIO {offset}")))
}

/// Request the LCD lines on `chip_path` and initialize the display
pub fn open_lcd(
    chip_path: &str,
    consumer: &str,
    wiring: &LcdWiring,
    geometry: Geometry,
) -> Result<BoardLcd> {
    debug!("opening LCD on {chip_path}: {wiring:?}");

    let mut chip = Chip::new(chip_path).map_err(hardware(format!("cannot open {chip_path}")))?;
    let mut line = |offset| output_line(&mut chip, offset, consumer);

    let sender = ParallelSender::new_4pin(
        line(wiring.rs)?,
        line(wiring.en)?,
        line(wiring.d4)?,
        line(wiring.d5)?,
        line(wiring.d6)?,
        line(wiring.d7)?,
    )
    .with_backlight(line(wiring.backlight)?, wiring.backlight_polarity);

    Lcd::new(sender, Delay, Config::default().set_geometry(geometry))
        .map_err(hardware("cannot initialize LCD".to_string()))
}

/// MCP3008 on a spidev node, every channel gets its own file descriptor
pub struct SpidevAdc {
    config: AdcConfig,
}

impl SpidevAdc {
    #[allow(missing_docs)]
    pub fn new(config: AdcConfig) -> Self {
        Self { config }
    }
}

impl OpenChannel for SpidevAdc {
    type Channel = Mcp3008<SpidevDevice>;
    type Error = anyhow::Error;

    fn open_channel(&mut self, index: u8) -> Result<Self::Channel> {
        let path = self.config.spi_device;
        debug!("opening MCP3008 channel {index} on {path}");

        let mut spi = SpidevDevice::open(path).map_err(hardware(format!("cannot open {path}")))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(self.config.max_speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.0
            .configure(&options)
            .with_context(|| format!("cannot configure {path}"))?;

        Mcp3008::new(spi, index).map_err(|err| anyhow!("{err}"))
    }
}
