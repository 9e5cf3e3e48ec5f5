use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    command::{CommandSet, Font, MoveDirection, ShiftType, State},
    lcd::Lcd,
    sender::SendCommand,
    state::LcdState,
};

/// Visible character grid of a display
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    #[allow(missing_docs)]
    pub columns: u8,
    #[allow(missing_docs)]
    pub rows: u8,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 2,
        }
    }
}

/// [`Config`] is the init config of a [`Lcd`]
#[derive(Default)]
pub struct Config {
    state: LcdState,
}

#[allow(missing_docs)]
impl Config {
    pub fn get_geometry(&self) -> Geometry {
        self.state.get_geometry()
    }

    pub fn set_geometry(mut self, geometry: Geometry) -> Self {
        self.state.set_geometry(geometry);
        self
    }

    pub fn get_backlight(&self) -> State {
        self.state.get_backlight()
    }

    pub fn set_backlight(mut self, backlight: State) -> Self {
        self.state.set_backlight(backlight);
        self
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.state.set_font(font);
        self
    }

    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    pub fn set_display_state(mut self, display: State) -> Self {
        self.state.set_display_state(display);
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.state.set_cursor_state(cursor);
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.state.set_cursor_blink(blink);
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.state.set_direction(dir);
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.state.set_shift_type(shift);
        self
    }
}

impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and init LCD hardware
    ///
    /// Init ends with a cleared display and the cursor at (0, 0).
    pub fn new(sender: Sender, delayer: Delayer, config: Config) -> Result<Self, Sender::Error> {
        let mut lcd = Lcd {
            sender,
            delayer,
            state: config.state,
        };

        let geometry = lcd.get_geometry();
        debug!(
            "initializing {}x{} LCD in 4 bit mode",
            geometry.columns, geometry.rows
        );

        // in initialization process, we'd better use "raw command", to strictly follow datasheet

        // the controller may be in 8 bit mode (power on) or in either phase of a 4 bit
        // transfer (a previous run), three reset nibbles bring it to 8 bit mode in all cases
        let Lcd {
            sender, delayer, ..
        } = &mut lcd;
        sender.delay_and_send(CommandSet::ResetNibble, delayer, 50_000)?;
        sender.delay_and_send(CommandSet::ResetNibble, delayer, 4_100)?;
        sender.delay_and_send(CommandSet::ResetNibble, delayer, 100)?;
        sender.delay_and_send(CommandSet::HalfFunctionSet, delayer, 100)?;
        delayer.delay_us(100);

        lcd.execute(lcd.function_set())?;
        lcd.send_display_on_off()?;
        lcd.clean_display()?;
        lcd.execute(CommandSet::EntryModeSet(
            lcd.get_direction(),
            lcd.get_shift_type(),
        ))?;

        // set backlight after LCD init
        lcd.set_backlight(lcd.get_backlight())?;

        Ok(lcd)
    }
}
