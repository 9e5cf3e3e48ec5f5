//! Write two lines of text to the character LCD, or clear it
//!
//! Wiring diagram (BCM numbering)
//!
//! LCD 0802 <-> Raspberry Pi
//!       RS <-> GPIO21
//!       RW <-> GND
//!       EN <-> GPIO20
//!       D4 <-> GPIO26
//!       D5 <-> GPIO19
//!       D6 <-> GPIO13
//!       D7 <-> GPIO6
//!        K <-> backlight switch <-> GPIO16 (active low)

use anyhow::Context;
use log::LevelFilter;

use pi_tools::{board, cli::DisplayArgs, config, display};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = DisplayArgs::parse_args();

    let mut lcd = board::open_lcd(
        config::GPIO_CHIP,
        config::GPIO_CONSUMER,
        &config::LCD_WIRING,
        config::LCD_GEOMETRY,
    )
    .context("cannot open LCD")?;

    display::run(&mut lcd, args.action(), &args.line1, &args.line2)
        .map_err(|err| anyhow::anyhow!("{err:?}"))
        .context("cannot write to LCD")
}
