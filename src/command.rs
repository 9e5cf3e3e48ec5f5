//! HD44780 instruction set, and how each instruction maps to RS and data bits

use crate::utils::BitOps;

/// Instructions the driver can issue.
///
/// The RW line is tied to ground on the supported wiring, so there is no
/// busy flag or RAM read instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandSet {
    /// Clear DDRAM and return the cursor to (0, 0)
    ClearDisplay,
    /// Return the cursor to (0, 0) and undo any display shift
    ReturnHome,
    /// Cursor move direction and display shift after each data write
    EntryModeSet(MoveDirection, ShiftType),
    /// Display, cursor and cursor blink on/off
    DisplayOnOff {
        /// whole display
        display: State,
        /// underline cursor
        cursor: State,
        /// blinking block cursor
        cursor_blink: State,
    },
    // not a datasheet command: the 0b0011 nibble of the reset-by-instruction sequence,
    // it takes the controller back to 8 bit mode whatever mode it was left in
    ResetNibble,
    // not a datasheet command either: the first (half) command of 4 pin mode
    HalfFunctionSet,
    /// Bus width, line count and font
    FunctionSet(DataWidth, LineMode, Font),
    /// Move the cursor to a DDRAM address
    SetDDRAM(u8),
    /// Write a byte at the cursor
    WriteDataToRAM(u8),
}

impl CommandSet {
    /// How long the controller stays busy after this instruction, in microseconds
    ///
    /// Datasheet values are 1.52 ms and 37 us at 270 kHz, rounded up for slow oscillators.
    pub fn execution_time_us(&self) -> u32 {
        match self {
            CommandSet::ClearDisplay | CommandSet::ReturnHome => 2_000,
            _ => 50,
        }
    }
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MoveDirection {
    RightToLeft,
    #[default]
    LeftToRight,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ShiftType {
    #[default]
    CursorOnly,
    CursorAndDisplay,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum State {
    Off,
    #[default]
    On,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DataWidth {
    #[default]
    Bit4,
    Bit8,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LineMode {
    OneLine,
    #[default]
    TwoLine,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Font {
    #[default]
    Font5x8,
    Font5x11,
}

/// Which register of the controller a [`Command`] goes to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegisterSelection {
    /// Instruction register, RS low
    Command,
    /// Data register, RS high
    Data,
}

/// Payload of a [`Command`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bits {
    /// A lone nibble, only used while the bus width is not yet settled
    Bit4(u8),
    /// A full byte
    Bit8(u8),
}

/// A raw instruction, ready to be put on the bus by a [`SendCommand`](crate::sender::SendCommand)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

impl Command {
    #[allow(missing_docs)]
    pub fn new(rs: RegisterSelection, data: Bits) -> Self {
        if let Bits::Bit4(nibble) = data {
            assert!(nibble < 2u8.pow(4), "data is greater than 4 bits");
        }

        Self { rs, data }
    }

    #[allow(missing_docs)]
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    #[allow(missing_docs)]
    pub fn get_data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::instruction(0b0000_0001),

            CommandSet::ReturnHome => Self::instruction(0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::instruction(raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                raw_bits.put_bit(2, display);
                raw_bits.put_bit(1, cursor);
                raw_bits.put_bit(0, cursor_blink);

                Self::instruction(raw_bits)
            }

            CommandSet::ResetNibble => Self::new(RegisterSelection::Command, Bits::Bit4(0b0011)),

            CommandSet::HalfFunctionSet => {
                Self::new(RegisterSelection::Command, Bits::Bit4(0b0010))
            }

            CommandSet::FunctionSet(width, line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                match width {
                    DataWidth::Bit4 => raw_bits.clear_bit(4),
                    DataWidth::Bit8 => raw_bits.set_bit(4),
                };

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                Self::instruction(raw_bits)
            }

            CommandSet::SetDDRAM(addr) => {
                assert!(addr < 2u8.pow(7), "DDRAM address out of range");

                Self::instruction(0b1000_0000 | addr)
            }

            CommandSet::WriteDataToRAM(data) => {
                Self::new(RegisterSelection::Data, Bits::Bit8(data))
            }
        }
    }
}

impl Command {
    fn instruction(raw_bits: u8) -> Self {
        Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction_byte(command: CommandSet) -> u8 {
        let command = Command::from(command);
        assert_eq!(command.get_register_selection(), RegisterSelection::Command);
        match command.get_data() {
            Bits::Bit8(byte) => byte,
            Bits::Bit4(nibble) => panic!("unexpected nibble {nibble:#06b}"),
        }
    }

    #[test]
    fn function_set_4bit_two_lines() {
        assert_eq!(
            instruction_byte(CommandSet::FunctionSet(
                DataWidth::Bit4,
                LineMode::TwoLine,
                Font::Font5x8
            )),
            0x28
        );
        assert_eq!(
            instruction_byte(CommandSet::FunctionSet(
                DataWidth::Bit8,
                LineMode::OneLine,
                Font::Font5x11
            )),
            0x34
        );
    }

    #[test]
    fn display_on_cursor_off() {
        assert_eq!(
            instruction_byte(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            0x0C
        );
        assert_eq!(
            instruction_byte(CommandSet::DisplayOnOff {
                display: State::Off,
                cursor: State::On,
                cursor_blink: State::On,
            }),
            0x0B
        );
    }

    #[test]
    fn entry_mode_and_ram_addresses() {
        assert_eq!(
            instruction_byte(CommandSet::EntryModeSet(
                MoveDirection::LeftToRight,
                ShiftType::CursorOnly
            )),
            0x06
        );
        assert_eq!(instruction_byte(CommandSet::ClearDisplay), 0x01);
        assert_eq!(instruction_byte(CommandSet::ReturnHome), 0x02);
        assert_eq!(instruction_byte(CommandSet::SetDDRAM(0x40)), 0xC0);
    }

    #[test]
    fn data_goes_to_data_register() {
        let command = Command::from(CommandSet::WriteDataToRAM(b'H'));
        assert_eq!(command.get_register_selection(), RegisterSelection::Data);
        assert_eq!(command.get_data(), Bits::Bit8(0x48));
    }

    #[test]
    fn init_nibbles() {
        assert_eq!(
            Command::from(CommandSet::ResetNibble).get_data(),
            Bits::Bit4(0b0011)
        );
        assert_eq!(
            Command::from(CommandSet::HalfFunctionSet).get_data(),
            Bits::Bit4(0b0010)
        );
    }

    #[test]
    #[should_panic(expected = "DDRAM address out of range")]
    fn ddram_address_overflow() {
        let _ = Command::from(CommandSet::SetDDRAM(0x80));
    }
}
