use embedded_hal::{
    delay::DelayNs,
    digital::{OutputPin, PinState},
};

use crate::{
    command::{Bits, Command, RegisterSelection, State},
    sender::SendCommand,
    utils::{BitOps, BitState},
};

/// Which level of the backlight pin lights the backlight
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum BacklightPolarity {
    /// Pin high turns backlight on
    ActiveHigh,
    /// Pin low turns backlight on, as with a PNP transistor switch
    #[default]
    ActiveLow,
}

impl BacklightPolarity {
    fn level(self, backlight: State) -> PinState {
        match (self, backlight) {
            (BacklightPolarity::ActiveHigh, State::On) | (BacklightPolarity::ActiveLow, State::Off) => {
                PinState::High
            }
            (BacklightPolarity::ActiveHigh, State::Off) | (BacklightPolarity::ActiveLow, State::On) => {
                PinState::Low
            }
        }
    }
}

/// 4 pin parallel sender
///
/// RW is expected to be tied to ground, so all pins are outputs and the
/// sender never reads from the LCD.
pub struct ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    rs_pin: ControlPin,
    en_pin: ControlPin,
    db_pins: [DBPin; 4],
    backlight: Option<(ControlPin, BacklightPolarity)>,
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    #[allow(missing_docs)]
    pub fn new_4pin(
        rs: ControlPin,
        en: ControlPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
            backlight: None,
        }
    }

    /// Attach a pin that switches the backlight
    pub fn with_backlight(mut self, pin: ControlPin, polarity: BacklightPolarity) -> Self {
        self.backlight = Some((pin, polarity));
        self
    }

    /// Give the pins back, in (RS, EN, [DB4..DB7], backlight) order
    #[allow(clippy::type_complexity)]
    pub fn release(self) -> (ControlPin, ControlPin, [DBPin; 4], Option<ControlPin>) {
        (
            self.rs_pin,
            self.en_pin,
            self.db_pins,
            self.backlight.map(|(pin, _)| pin),
        )
    }

    fn push_bits(&mut self, raw_bits: u8) -> Result<(), ControlPin::Error> {
        self.db_pins
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, pin)| match raw_bits.check_bit(index as u8) {
                BitState::Set => pin.set_high(),
                BitState::Clear => pin.set_low(),
            })
    }

    // the controller latches DB4..DB7 on the falling edge of EN
    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) -> Result<(), ControlPin::Error> {
        self.en_pin.set_low()?;
        delayer.delay_us(1);
        self.en_pin.set_high()?;
        delayer.delay_us(1);
        self.en_pin.set_low()?;
        delayer.delay_us(1);
        Ok(())
    }

    fn write_nibble(
        &mut self,
        nibble: u8,
        delayer: &mut impl DelayNs,
    ) -> Result<(), ControlPin::Error> {
        self.push_bits(nibble)?;
        self.pulse_enable(delayer)
    }
}

impl<ControlPin, DBPin, Delayer> SendCommand<Delayer> for ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
    Delayer: DelayNs,
{
    type Error = ControlPin::Error;

    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Self::Error> {
        match command.get_register_selection() {
            RegisterSelection::Command => self.rs_pin.set_low()?,
            RegisterSelection::Data => self.rs_pin.set_high()?,
        }

        match command.get_data() {
            Bits::Bit4(raw_bits) => self.write_nibble(raw_bits, delayer),
            Bits::Bit8(raw_bits) => {
                let (high, low) = raw_bits.nibbles();
                self.write_nibble(high, delayer)?;
                self.write_nibble(low, delayer)
            }
        }
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        match self.backlight.as_mut() {
            Some((pin, polarity)) => pin.set_state(polarity.level(backlight)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State as PinLevel, Transaction as PinTransaction},
    };

    use super::*;
    use crate::command::CommandSet;

    fn pin(levels: &[PinLevel]) -> PinMock {
        let transactions: Vec<PinTransaction> =
            levels.iter().map(|level| PinTransaction::set(level.clone())).collect();
        PinMock::new(&transactions)
    }

    fn enable_pulses(count: usize) -> Vec<PinLevel> {
        (0..count)
            .flat_map(|_| [PinLevel::Low, PinLevel::High, PinLevel::Low])
            .collect()
    }

    struct Bus {
        rs: PinMock,
        en: PinMock,
        db: [PinMock; 4],
    }

    impl Bus {
        fn sender(&self) -> ParallelSender<PinMock, PinMock> {
            ParallelSender::new_4pin(
                self.rs.clone(),
                self.en.clone(),
                self.db[0].clone(),
                self.db[1].clone(),
                self.db[2].clone(),
                self.db[3].clone(),
            )
        }

        fn done(&mut self) {
            self.rs.done();
            self.en.done();
            self.db.iter_mut().for_each(|pin| pin.done());
        }
    }

    #[test]
    fn data_byte_goes_high_nibble_first() {
        use PinLevel::{High, Low};

        // 'H' = 0x48 -> 0b0100 then 0b1000
        let mut bus = Bus {
            rs: pin(&[High]),
            en: pin(&enable_pulses(2)),
            db: [
                pin(&[Low, Low]),
                pin(&[Low, Low]),
                pin(&[High, Low]),
                pin(&[Low, High]),
            ],
        };

        let mut sender = bus.sender();
        sender
            .send(CommandSet::WriteDataToRAM(b'H').into(), &mut NoopDelay)
            .unwrap();

        bus.done();
    }

    #[test]
    fn lone_nibble_is_one_pulse_with_rs_low() {
        use PinLevel::{High, Low};

        let mut bus = Bus {
            rs: pin(&[Low]),
            en: pin(&enable_pulses(1)),
            db: [pin(&[High]), pin(&[High]), pin(&[Low]), pin(&[Low])],
        };

        let mut sender = bus.sender();
        sender
            .send(CommandSet::ResetNibble.into(), &mut NoopDelay)
            .unwrap();

        bus.done();
    }

    #[test]
    fn backlight_respects_polarity() {
        let mut bus = Bus {
            rs: pin(&[]),
            en: pin(&[]),
            db: [pin(&[]), pin(&[]), pin(&[]), pin(&[])],
        };
        let mut backlight = pin(&[PinLevel::Low, PinLevel::High]);

        let mut sender = bus
            .sender()
            .with_backlight(backlight.clone(), BacklightPolarity::ActiveLow);
        SendCommand::<NoopDelay>::set_backlight(&mut sender, State::On).unwrap();
        SendCommand::<NoopDelay>::set_backlight(&mut sender, State::Off).unwrap();

        bus.done();
        backlight.done();
    }

    #[test]
    fn no_backlight_pin_is_a_no_op() {
        let mut bus = Bus {
            rs: pin(&[]),
            en: pin(&[]),
            db: [pin(&[]), pin(&[]), pin(&[]), pin(&[])],
        };

        let mut sender = bus.sender();
        SendCommand::<NoopDelay>::set_backlight(&mut sender, State::On).unwrap();

        let (_, _, _, backlight) = sender.release();
        assert!(backlight.is_none());
        bus.done();
    }
}
