//! Print MCP3008 channels 0 to 6 as one tab separated line

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use pi_tools::{board::SpidevAdc, cli::SamplerArgs, config, sampler};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let SamplerArgs {} = SamplerArgs::parse();

    let adc_config = config::ADC;
    let channels = adc_config.channels.clone();
    let scale = adc_config.scale;
    let mut adc = SpidevAdc::new(adc_config);

    // nothing is printed unless every channel was read
    let values = sampler::sample(&mut adc, channels, scale)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(sampler::format_line(&values).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
