use crate::{
    command::{Font, LineMode, MoveDirection, ShiftType, State},
    lcd::Geometry,
};

// DDRAM start address of each row in two line mode
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// What the driver believes the controller is doing, the controller itself can't be read back
pub(crate) struct LcdState {
    geometry: Geometry,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
    cursor_pos: (u8, u8),
    backlight: State,
}

impl Default for LcdState {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            font: Font::default(),
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::default(),
            shift_type: ShiftType::default(),
            cursor_pos: (0, 0),
            backlight: State::On,
        }
    }
}

impl LcdState {
    pub(crate) fn get_backlight(&self) -> State {
        self.backlight
    }

    pub(crate) fn set_backlight(&mut self, backlight: State) {
        self.backlight = backlight;
    }

    pub(crate) fn get_geometry(&self) -> Geometry {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: Geometry) {
        assert!(
            (1..=2).contains(&geometry.rows),
            "only 1 or 2 rows are addressable"
        );

        let line_mode = match geometry.rows {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        };
        assert!(
            (1..=Self::capacity_of(line_mode)).contains(&geometry.columns),
            "column count exceeds line capacity"
        );
        assert!(
            !(self.font == Font::Font5x11 && line_mode == LineMode::TwoLine),
            "font is 5x11, line cannot be 2"
        );

        self.geometry = geometry;
    }

    pub(crate) fn get_line_mode(&self) -> LineMode {
        match self.geometry.rows {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        }
    }

    fn capacity_of(line_mode: LineMode) -> u8 {
        match line_mode {
            LineMode::OneLine => 80,
            LineMode::TwoLine => 40,
        }
    }

    pub(crate) fn get_line_capacity(&self) -> u8 {
        Self::capacity_of(self.get_line_mode())
    }

    pub(crate) fn get_font(&self) -> Font {
        self.font
    }

    pub(crate) fn set_font(&mut self, font: Font) {
        assert!(
            !(self.get_line_mode() == LineMode::TwoLine && font == Font::Font5x11),
            "there is 2 line, font cannot be 5x11"
        );

        self.font = font;
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    pub(crate) fn get_cursor_pos(&self) -> (u8, u8) {
        self.cursor_pos
    }

    pub(crate) fn set_cursor_pos(&mut self, pos: (u8, u8)) {
        assert!(pos.0 < self.get_line_capacity(), "x offset too big");
        assert!(pos.1 < self.geometry.rows, "y offset too big");

        self.cursor_pos = pos;
    }

    /// DDRAM address of a cursor position
    pub(crate) fn ddram_addr(&self, pos: (u8, u8)) -> u8 {
        ROW_OFFSETS[pos.1 as usize] + pos.0
    }

    // the address counter moves after every data write, and DDRAM is looped,
    // in two line mode the end of one line runs into the start of the other
    pub(crate) fn advance_cursor(&mut self) {
        let (x, y) = self.cursor_pos;
        let last_x = self.get_line_capacity() - 1;
        let last_y = self.geometry.rows - 1;

        self.cursor_pos = match self.direction {
            MoveDirection::LeftToRight if x == last_x => (0, if y == last_y { 0 } else { y + 1 }),
            MoveDirection::LeftToRight => (x + 1, y),
            MoveDirection::RightToLeft if x == 0 => (last_x, if y == 0 { last_y } else { y - 1 }),
            MoveDirection::RightToLeft => (x - 1, y),
        };
    }

    /// Where a line break should put the cursor
    ///
    /// Rows past the last one stay on the last row.
    pub(crate) fn next_line_pos(&self) -> (u8, u8) {
        let row = (self.cursor_pos.1 + 1).min(self.geometry.rows - 1);

        match self.direction {
            MoveDirection::LeftToRight => (0, row),
            MoveDirection::RightToLeft => (self.geometry.columns - 1, row),
        }
    }
}
