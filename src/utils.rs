//! Common tools

use crate::command::State;

/// The state of a bit,
/// It's either [`BitState::Clear`] to represent a 0
/// or [`BitState::Set`] to represent a 1
#[derive(Debug, PartialEq)]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

impl From<State> for BitState {
    fn from(state: State) -> Self {
        match state {
            State::Off => BitState::Clear,
            State::On => BitState::Set,
        }
    }
}

/// Simple bit ops
pub trait BitOps {
    #[allow(missing_docs)]
    fn set_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// Set or clear a bit, depends on `state`
    fn put_bit(&mut self, pos: u8, state: impl Into<BitState>) -> Self;
    #[allow(missing_docs)]
    fn check_bit(&self, pos: u8) -> BitState;
    /// Split into (upper 4 bits, lower 4 bits), both right aligned
    fn nibbles(&self) -> (u8, u8);
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << pos;
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << pos);
        *self
    }

    fn put_bit(&mut self, pos: u8, state: impl Into<BitState>) -> Self {
        match state.into() {
            BitState::Set => self.set_bit(pos),
            BitState::Clear => self.clear_bit(pos),
        }
    }

    fn check_bit(&self, pos: u8) -> BitState {
        assert!(pos <= 7, "bit offset larger than 7");

        match (*self >> pos) & 1 == 1 {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }

    fn nibbles(&self) -> (u8, u8) {
        (*self >> 4, *self & 0b1111)
    }
}
