use embedded_hal::delay::DelayNs;
use log::trace;

use crate::{
    command::{CommandSet, DataWidth, Font, LineMode, MoveDirection, ShiftType, State},
    display::CharDisplay,
    sender::SendCommand,
    state::LcdState,
};

mod init;

pub use init::{Config, Geometry};

/// A character LCD driven through a [`SendCommand`] sender
///
/// The driver owns the sender and the delayer, drop it (or call [`Lcd::release`])
/// to give the pins back.
pub struct Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: Sender,
    delayer: Delayer,
    state: LcdState,
}

impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Give back the sender and the delayer
    pub fn release(self) -> (Sender, Delayer) {
        (self.sender, self.delayer)
    }

    fn execute(&mut self, command: CommandSet) -> Result<(), Sender::Error> {
        self.sender.send_and_settle(command, &mut self.delayer)
    }

    /// Note:
    /// Due to driver implementation, this function may have actual effect, or not
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Sender::Error> {
        self.sender.set_backlight(backlight)?;
        self.state.set_backlight(backlight);
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn get_backlight(&self) -> State {
        self.state.get_backlight()
    }

    /// Write a raw byte at the cursor, the cursor then moves one cell along
    pub fn write_u8_to_cur(&mut self, byte: impl Into<u8>) -> Result<(), Sender::Error> {
        self.execute(CommandSet::WriteDataToRAM(byte.into()))?;

        // the address counter of the controller moves by itself, we only mirror it
        self.state.advance_cursor();
        Ok(())
    }

    /// write [char] to current position
    /// In default implementation, character only support
    /// from ASCII 0x20 (white space) to ASCII 0x7E (`~`)
    pub fn write_char_to_cur(&mut self, char: char) -> Result<(), Sender::Error> {
        // map char out side of ASCII 0x20 and 0x7E to full rectangle
        let out_byte = match char {
            ' '..='~' => char as u8,
            _ => 0xFF,
        };

        self.write_u8_to_cur(out_byte)
    }

    /// Write text at the cursor, `'\n'` starts the next row
    ///
    /// Nothing is truncated: text longer than the visible columns keeps going
    /// into off-screen DDRAM, line breaks past the last row stay on the last row.
    pub fn message(&mut self, text: &str) -> Result<(), Sender::Error> {
        trace!("message {text:?}");

        text.chars().try_for_each(|char| match char {
            '\n' => self.set_cursor_pos(self.state.next_line_pos()),
            _ => self.write_char_to_cur(char),
        })
    }

    /// Erase DDRAM and put the cursor back at (0, 0)
    pub fn clean_display(&mut self) -> Result<(), Sender::Error> {
        self.execute(CommandSet::ClearDisplay)?;
        self.state.set_cursor_pos((0, 0));
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn return_home(&mut self) -> Result<(), Sender::Error> {
        self.execute(CommandSet::ReturnHome)?;
        self.state.set_cursor_pos((0, 0));
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn set_display_state(&mut self, display: State) -> Result<(), Sender::Error> {
        self.state.set_display_state(display);
        self.send_display_on_off()
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    #[allow(missing_docs)]
    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_state(cursor);
        self.send_display_on_off()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    #[allow(missing_docs)]
    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_blink(blink);
        self.send_display_on_off()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    fn send_display_on_off(&mut self) -> Result<(), Sender::Error> {
        self.execute(CommandSet::DisplayOnOff {
            display: self.get_display_state(),
            cursor: self.get_cursor_state(),
            cursor_blink: self.get_cursor_blink_state(),
        })
    }

    #[allow(missing_docs)]
    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Sender::Error> {
        self.state.set_direction(dir);
        self.execute(CommandSet::EntryModeSet(
            self.get_direction(),
            self.get_shift_type(),
        ))
    }

    #[allow(missing_docs)]
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    #[allow(missing_docs)]
    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    #[allow(missing_docs)]
    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    #[allow(missing_docs)]
    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    #[allow(missing_docs)]
    pub fn get_geometry(&self) -> Geometry {
        self.state.get_geometry()
    }

    /// Move the cursor, `pos` is (column, row)
    pub fn set_cursor_pos(&mut self, pos: (u8, u8)) -> Result<(), Sender::Error> {
        self.state.set_cursor_pos(pos);
        self.execute(CommandSet::SetDDRAM(self.state.ddram_addr(pos)))
    }

    #[allow(missing_docs)]
    pub fn get_cursor_pos(&self) -> (u8, u8) {
        self.state.get_cursor_pos()
    }

    // FunctionSet is sent with the width picked at init, the sender only speaks 4 bit
    fn function_set(&self) -> CommandSet {
        CommandSet::FunctionSet(DataWidth::Bit4, self.get_line_mode(), self.get_font())
    }
}

impl<Sender, Delayer> CharDisplay for Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    type Error = Sender::Error;

    fn message(&mut self, text: &str) -> Result<(), Self::Error> {
        Lcd::message(self, text)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.clean_display()
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal_mock::eh1::delay::NoopDelay;

    use super::*;
    use crate::command::{Bits, Command, RegisterSelection};

    /// What went over the bus, as (RS, payload)
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Sent {
        Nibble(u8),
        Instruction(u8),
        Data(u8),
        Backlight(State),
    }

    #[derive(Default)]
    struct RecordingSender {
        sent: Vec<Sent>,
    }

    impl SendCommand<NoopDelay> for RecordingSender {
        type Error = Infallible;

        fn send(&mut self, command: Command, _: &mut NoopDelay) -> Result<(), Infallible> {
            self.sent.push(match (command.get_register_selection(), command.get_data()) {
                (RegisterSelection::Command, Bits::Bit4(nibble)) => Sent::Nibble(nibble),
                (RegisterSelection::Command, Bits::Bit8(byte)) => Sent::Instruction(byte),
                (RegisterSelection::Data, Bits::Bit8(byte)) => Sent::Data(byte),
                (RegisterSelection::Data, Bits::Bit4(nibble)) => {
                    panic!("data nibble {nibble:#06b} on the bus")
                }
            });
            Ok(())
        }

        fn set_backlight(&mut self, backlight: State) -> Result<(), Infallible> {
            self.sent.push(Sent::Backlight(backlight));
            Ok(())
        }
    }

    fn lcd_8x2() -> Lcd<RecordingSender, NoopDelay> {
        let config = Config::default().set_geometry(Geometry {
            columns: 8,
            rows: 2,
        });
        let mut lcd = Lcd::new(RecordingSender::default(), NoopDelay, config).unwrap();
        lcd.sender.sent.clear();
        lcd
    }

    fn sent(lcd: Lcd<RecordingSender, NoopDelay>) -> Vec<Sent> {
        let (sender, _) = lcd.release();
        sender.sent
    }

    #[test]
    fn init_resets_then_configures() {
        let config = Config::default().set_geometry(Geometry {
            columns: 8,
            rows: 2,
        });
        let lcd = Lcd::new(RecordingSender::default(), NoopDelay, config).unwrap();

        assert_eq!(lcd.get_cursor_pos(), (0, 0));
        assert_eq!(
            sent(lcd),
            vec![
                Sent::Nibble(0b0011),
                Sent::Nibble(0b0011),
                Sent::Nibble(0b0011),
                Sent::Nibble(0b0010),
                Sent::Instruction(0x28),
                Sent::Instruction(0x0C),
                Sent::Instruction(0x01),
                Sent::Instruction(0x06),
                Sent::Backlight(State::On),
            ]
        );
    }

    #[test]
    fn init_honours_config() {
        let config = Config::default()
            .set_geometry(Geometry {
                columns: 16,
                rows: 1,
            })
            .set_font(Font::Font5x11)
            .set_cursor_state(State::On)
            .set_backlight(State::Off);
        let lcd = Lcd::new(RecordingSender::default(), NoopDelay, config).unwrap();

        let sent = sent(lcd);
        assert_eq!(sent[4], Sent::Instruction(0x24));
        assert_eq!(sent[5], Sent::Instruction(0x0E));
        assert_eq!(sent.last(), Some(&Sent::Backlight(State::Off)));
    }

    #[test]
    fn message_breaks_line_at_newline() {
        let mut lcd = lcd_8x2();
        lcd.message("Hi\nyo").unwrap();

        assert_eq!(
            sent(lcd),
            vec![
                Sent::Data(b'H'),
                Sent::Data(b'i'),
                Sent::Instruction(0xC0),
                Sent::Data(b'y'),
                Sent::Data(b'o'),
            ]
        );
    }

    #[test]
    fn empty_lines_only_move_the_cursor() {
        let mut lcd = lcd_8x2();
        lcd.message("\n").unwrap();

        assert_eq!(lcd.get_cursor_pos(), (0, 1));
        assert_eq!(sent(lcd), vec![Sent::Instruction(0xC0)]);
    }

    #[test]
    fn long_text_is_not_truncated() {
        let mut lcd = lcd_8x2();
        lcd.message("0123456789").unwrap();

        assert_eq!(lcd.get_cursor_pos(), (10, 0));
        assert_eq!(sent(lcd).len(), 10);
    }

    #[test]
    fn extra_line_breaks_stay_on_last_row() {
        let mut lcd = lcd_8x2();
        lcd.message("a\nb\nc").unwrap();

        assert_eq!(
            sent(lcd),
            vec![
                Sent::Data(b'a'),
                Sent::Instruction(0xC0),
                Sent::Data(b'b'),
                Sent::Instruction(0xC0),
                Sent::Data(b'c'),
            ]
        );
    }

    #[test]
    fn unprintable_chars_become_full_block() {
        let mut lcd = lcd_8x2();
        lcd.message("é~\u{7f}").unwrap();

        assert_eq!(
            sent(lcd),
            vec![Sent::Data(0xFF), Sent::Data(b'~'), Sent::Data(0xFF)]
        );
    }

    #[test]
    fn clear_homes_the_cursor() {
        let mut lcd = lcd_8x2();
        lcd.message("abc").unwrap();
        lcd.clean_display().unwrap();

        assert_eq!(lcd.get_cursor_pos(), (0, 0));
        assert_eq!(sent(lcd).last(), Some(&Sent::Instruction(0x01)));
    }

    #[test]
    fn return_home_moves_cursor_to_origin() {
        let mut lcd = lcd_8x2();
        lcd.message("a\nbc").unwrap();
        lcd.return_home().unwrap();

        assert_eq!(lcd.get_cursor_pos(), (0, 0));
        assert_eq!(sent(lcd).last(), Some(&Sent::Instruction(0x02)));
    }

    #[test]
    fn right_to_left_breaks_line_at_last_column() {
        let mut lcd = lcd_8x2();
        lcd.set_direction(MoveDirection::RightToLeft).unwrap();
        lcd.message("a\nb").unwrap();

        assert_eq!(lcd.get_cursor_pos(), (6, 1));
        assert_eq!(
            sent(lcd),
            vec![
                Sent::Instruction(0x04),
                Sent::Data(b'a'),
                Sent::Instruction(0xC7),
                Sent::Data(b'b'),
            ]
        );
    }

    #[test]
    fn init_honours_entry_mode() {
        let config = Config::default()
            .set_direction(MoveDirection::RightToLeft)
            .set_shift_type(ShiftType::CursorAndDisplay);
        let lcd = Lcd::new(RecordingSender::default(), NoopDelay, config).unwrap();

        assert_eq!(lcd.get_direction(), MoveDirection::RightToLeft);
        assert_eq!(lcd.get_shift_type(), ShiftType::CursorAndDisplay);
        assert_eq!(sent(lcd)[7], Sent::Instruction(0x05));
    }

    #[test]
    fn display_flags_share_one_instruction() {
        let mut lcd = lcd_8x2();
        lcd.set_cursor_state(State::On).unwrap();
        lcd.set_cursor_blink_state(State::On).unwrap();
        lcd.set_display_state(State::Off).unwrap();

        assert_eq!(
            sent(lcd),
            vec![
                Sent::Instruction(0x0E),
                Sent::Instruction(0x0F),
                Sent::Instruction(0x0B),
            ]
        );
    }
}
