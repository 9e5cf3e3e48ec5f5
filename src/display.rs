//! Display Writer: two lines of words onto the LCD, or a blank screen

use core::borrow::Borrow;

use log::debug;

/// The two operations the display writer needs from a character display
pub trait CharDisplay {
    /// Error raised by the display
    type Error;

    /// Write text from the cursor, `'\n'` starts the next row
    fn message(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Erase everything and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// What to do with the display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Show the two lines
    Display,
    /// Blank the display
    Clear,
}

impl From<&str> for Action {
    /// Only the exact word `display` shows text, anything else clears
    fn from(action: &str) -> Self {
        match action {
            "display" => Action::Display,
            _ => Action::Clear,
        }
    }
}

/// Words of each line joined by single spaces, lines joined by `'\n'`
pub fn compose_message<S: Borrow<str>>(line1: &[S], line2: &[S]) -> String {
    format!("{}\n{}", line1.join(" "), line2.join(" "))
}

/// Perform `action` on `display`
pub fn run<D, S>(display: &mut D, action: Action, line1: &[S], line2: &[S]) -> Result<(), D::Error>
where
    D: CharDisplay,
    S: Borrow<str>,
{
    match action {
        Action::Display => {
            let message = compose_message(line1, line2);
            debug!("displaying {message:?}");
            display.message(&message)
        }
        Action::Clear => {
            debug!("clearing display");
            display.clear()
        }
    }
}
