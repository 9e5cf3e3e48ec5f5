//! Built-in sender
//! If you want to drive the LCD over another bus, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::{Command, CommandSet, State};

mod parallel_sender;

pub use parallel_sender::{BacklightPolarity, ParallelSender};

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
pub trait SendCommand<Delayer: DelayNs> {
    /// Error raised by the underlying bus or pins
    type Error;

    /// Put a [`Command`] on the bus
    ///
    /// `delayer` is there for bus level timing (enable pulse width and such),
    /// the controller's execution time is handled by the caller.
    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Self::Error>;

    /// Wait specific duration, and send command
    fn delay_and_send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        delayer.delay_us(delay_us);
        self.send(command.into(), delayer)
    }

    /// Send command, then wait until the controller has executed it
    ///
    /// Without a RW line there is no busy flag to poll, so this waits the
    /// worst-case execution time instead.
    fn send_and_settle(
        &mut self,
        command: CommandSet,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        self.send(command.into(), delayer)?;
        delayer.delay_us(command.execution_time_us());
        Ok(())
    }

    /// Set the backlight
    ///
    /// Note:
    /// If a driver doesn't support change backlight, just silently bypass it
    #[allow(unused_variables)]
    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        Ok(())
    }
}
