/*!
# Pi Tools

Two one-shot tools for a Raspberry Pi and its peripherals:

* `chardisplay` writes two lines of text to an 8x2 character LCD, or clears it
* `mcp3008` prints channels 0 to 6 of an MCP3008 ADC, scaled to 0-100

Driver layout:

1. A "sender" puts LCD instructions on a bus, [`sender::ParallelSender`] does it
   over 4 data pins. Any bus implementing [`sender::SendCommand`] will do.
<br/>
<br/>
2. [`lcd::Lcd::new()`] takes a sender, a delayer and a [`lcd::Config`],
   and initializes the LCD hardware
<br/>
<br/>
3. An ADC implements [`adc::OpenChannel`], [`adc::mcp3008::Mcp3008`] is the handle
   of one MCP3008 channel

[`display`] and [`sampler`] hold the logic of each tool, [`board`] binds
everything to the Linux device nodes named in [`config`].
*/

#![warn(missing_docs)]

pub mod adc;
pub mod board;
pub mod cli;
pub mod command;
pub mod config;
pub mod display;
pub mod lcd;
pub mod sampler;
pub mod sender;
mod state;
pub mod utils;
