#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation layer for Tower Climb drivers.
//!
//! The crate owns a terminal-agnostic [`Screen`]: a fixed cell matrix that
//! a driver repaints from a [`ScreenProps`] snapshot after every applied
//! command, then copies to whatever backend it drives. Keeping the layout
//! here means the terminal backend only ever shovels cells, and the whole
//! screen can be asserted on as plain text.

use std::time::Duration;

use tower_climb_core::{FloorClass, GridPos, ObjectClass};

/// Number of rows on the screen.
pub const SCREEN_ROWS: u32 = 24;

/// Number of columns on the screen.
pub const SCREEN_COLUMNS: u32 = 80;

/// Screen offset the field's top-left cell is drawn at.
const FIELD_ORIGIN: GridPos = GridPos::new(2, 2);

/// Terminal palette used by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Terminal black.
    Black,
    /// Terminal white.
    White,
    /// Terminal yellow.
    Yellow,
    /// Terminal magenta.
    Magenta,
    /// Terminal green.
    Green,
    /// Terminal cyan.
    Cyan,
}

/// A single presentable cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenCell {
    symbol: char,
    foreground: Color,
    background: Color,
}

impl ScreenCell {
    /// Character shown in the cell.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Foreground color of the cell.
    #[must_use]
    pub const fn foreground(&self) -> Color {
        self.foreground
    }

    /// Background color of the cell.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.background
    }
}

/// Presentation classes of one field cell, assembled by the driver from
/// world queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldCellProps {
    object: ObjectClass,
    floor: FloorClass,
}

impl FieldCellProps {
    /// Creates the props for a single field cell.
    #[must_use]
    pub const fn new(object: ObjectClass, floor: FloorClass) -> Self {
        Self { object, floor }
    }

    /// Symbol and foreground color the cell is drawn with. Objects win
    /// over floor markings; a marking only shows through an empty cell.
    const fn presentation(&self) -> (char, Color) {
        match self.object {
            ObjectClass::Hero => ('@', Color::Magenta),
            ObjectClass::Wall => ('#', Color::Yellow),
            ObjectClass::Empty => match self.floor {
                FloorClass::Upstairs => ('<', Color::Green),
                FloorClass::Empty => ('.', Color::White),
            },
        }
    }
}

/// Per-frame update query the driver derives from the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenProps {
    /// Field cells in row-major rows, `FIELD_ROWS` x `FIELD_COLUMNS`.
    pub field_cells: Vec<Vec<FieldCellProps>>,
    /// Countdown value to display.
    pub remaining_time: Duration,
    /// Floor number to display.
    pub floor_number: u32,
    /// Whether the run is over, which reveals the rank message.
    pub is_finished: bool,
}

/// A positioned single-line text. ASCII only; line breaks are not allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ScreenText {
    position: GridPos,
    text: String,
    foreground: Color,
}

/// Splits one help line into differently colored parts laid out head to
/// tail from the given position.
fn sequential_texts(position: GridPos, parts: &[(&str, Color)]) -> Vec<ScreenText> {
    let mut texts = Vec::with_capacity(parts.len());
    let mut delta_x = 0;
    for (text, foreground) in parts {
        texts.push(ScreenText {
            position: GridPos::new(position.row(), position.column() + delta_x),
            text: (*text).to_owned(),
            foreground: *foreground,
        });
        delta_x += text.len() as u32;
    }
    texts
}

/// The fixed-size cell matrix every frame is painted onto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    rows: u32,
    columns: u32,
    cells: Vec<ScreenCell>,
    static_texts: Vec<ScreenText>,
}

impl Screen {
    /// Creates the 24x80 game screen with its static help texts.
    #[must_use]
    pub fn new() -> Self {
        let cells = vec![
            ScreenCell {
                symbol: '_',
                foreground: Color::White,
                background: Color::Black,
            };
            (SCREEN_ROWS * SCREEN_COLUMNS) as usize
        ];

        let mut static_texts = vec![
            ScreenText {
                position: GridPos::new(0, 2),
                text: "[ Tower Climb ]".to_owned(),
                foreground: Color::White,
            },
            ScreenText {
                position: GridPos::new(11, 25),
                text: "[ Operations ]".to_owned(),
                foreground: Color::White,
            },
        ];
        static_texts.extend(sequential_texts(
            GridPos::new(12, 25),
            &[
                ("\"", Color::White),
                ("s", Color::Yellow),
                ("\" ... Start or restart a new game.", Color::White),
            ],
        ));
        static_texts.extend(sequential_texts(
            GridPos::new(13, 25),
            &[
                ("Arrow keys", Color::Yellow),
                (" or \"", Color::White),
                ("k,l,j,h", Color::Yellow),
                ("\" ... Move the player.", Color::White),
            ],
        ));
        static_texts.push(ScreenText {
            position: GridPos::new(17, 3),
            text: "Move the player in the upper left to reach the stairs in the lower right."
                .to_owned(),
            foreground: Color::White,
        });
        static_texts.push(ScreenText {
            position: GridPos::new(18, 3),
            text: "The score is the number of floors that can be reached within 30 seconds."
                .to_owned(),
            foreground: Color::White,
        });

        Self {
            rows: SCREEN_ROWS,
            columns: SCREEN_COLUMNS,
            cells,
            static_texts,
        }
    }

    /// Number of rows on the screen.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns on the screen.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the cell at the given position, if it exists.
    #[must_use]
    pub fn cell_at(&self, position: GridPos) -> Option<&ScreenCell> {
        self.index(position).map(|index| &self.cells[index])
    }

    /// Repaints the whole matrix from the provided props.
    pub fn render(&mut self, props: &ScreenProps) {
        self.paint_chrome();
        self.paint_field(&props.field_cells);

        for text in &self.static_texts {
            place_text(&mut self.cells, self.rows, self.columns, text);
        }

        let remaining = props.remaining_time.as_secs_f64();
        place_text(
            &mut self.cells,
            self.rows,
            self.columns,
            &ScreenText {
                position: GridPos::new(3, 25),
                text: format!("Time : {remaining:4.1}"),
                foreground: Color::White,
            },
        );
        place_text(
            &mut self.cells,
            self.rows,
            self.columns,
            &ScreenText {
                position: GridPos::new(4, 25),
                text: format!("Floor: {:2}", props.floor_number),
                foreground: Color::White,
            },
        );
        if props.is_finished {
            let (message, foreground) = rank_message(props.floor_number);
            place_text(
                &mut self.cells,
                self.rows,
                self.columns,
                &ScreenText {
                    position: GridPos::new(5, 27),
                    text: message.to_owned(),
                    foreground,
                },
            );
        }
    }

    /// Joins the cell symbols into newline-separated rows.
    #[must_use]
    pub fn as_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows as usize);
        for row in 0..self.rows {
            let line: String = (0..self.columns)
                .map(|column| {
                    self.cells[(row * self.columns + column) as usize].symbol
                })
                .collect();
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Blanks the matrix and draws the outer border.
    fn paint_chrome(&mut self) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let top_or_bottom = row == 0 || row == self.rows - 1;
                let left_or_right = column == 0 || column == self.columns - 1;
                let symbol = match (top_or_bottom, left_or_right) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => ' ',
                };
                let index = (row * self.columns + column) as usize;
                self.cells[index] = ScreenCell {
                    symbol,
                    foreground: Color::White,
                    background: Color::Black,
                };
            }
        }
    }

    fn paint_field(&mut self, field_cells: &[Vec<FieldCellProps>]) {
        for (row, cells_row) in field_cells.iter().enumerate() {
            for (column, props) in cells_row.iter().enumerate() {
                let position = GridPos::new(
                    FIELD_ORIGIN.row() + row as u32,
                    FIELD_ORIGIN.column() + column as u32,
                );
                let Some(index) = self.index(position) else {
                    continue;
                };
                let (symbol, foreground) = props.presentation();
                self.cells[index] = ScreenCell {
                    symbol,
                    foreground,
                    background: Color::Black,
                };
            }
        }
    }

    fn index(&self, position: GridPos) -> Option<usize> {
        if !position.is_within(self.rows, self.columns) {
            return None;
        }
        Some((position.row() * self.columns + position.column()) as usize)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes a text's characters into the matrix, coloring them as it goes.
/// Characters falling outside the matrix are dropped.
fn place_text(cells: &mut [ScreenCell], rows: u32, columns: u32, text: &ScreenText) {
    for (delta_x, symbol) in text.text.chars().enumerate() {
        let position = GridPos::new(text.position.row(), text.position.column() + delta_x as u32);
        if !position.is_within(rows, columns) {
            continue;
        }
        let index = (position.row() * columns + position.column()) as usize;
        cells[index].symbol = symbol;
        cells[index].foreground = text.foreground;
    }
}

/// Rank shown once a run ends, keyed on the floor number reached.
fn rank_message(floor_number: u32) -> (&'static str, Color) {
    match floor_number {
        3 => ("Good!", Color::Green),
        4 => ("Excellent!", Color::Green),
        5 => ("Marvelous!", Color::Green),
        6.. => ("Legendary!!", Color::Cyan),
        _ => ("No good...", Color::White),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        rank_message, Color, FieldCellProps, Screen, ScreenProps, SCREEN_COLUMNS, SCREEN_ROWS,
    };
    use std::time::Duration;
    use tower_climb_core::{FloorClass, GridPos, ObjectClass};

    fn empty_field_cells() -> Vec<Vec<FieldCellProps>> {
        vec![
            vec![FieldCellProps::new(ObjectClass::Empty, FloorClass::Empty); 21];
            13
        ]
    }

    fn props(field_cells: Vec<Vec<FieldCellProps>>) -> ScreenProps {
        ScreenProps {
            field_cells,
            remaining_time: Duration::from_secs(30),
            floor_number: 1,
            is_finished: false,
        }
    }

    #[test]
    fn screen_measures_twenty_four_by_eighty() {
        let screen = Screen::new();
        let text = screen.as_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SCREEN_ROWS as usize);
        for line in lines {
            assert_eq!(line.chars().count(), SCREEN_COLUMNS as usize);
        }
    }

    #[test]
    fn render_draws_the_border_and_chrome() {
        let mut screen = Screen::new();
        screen.render(&props(empty_field_cells()));
        let text = screen.as_text();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("+-"));
        assert!(lines[0].ends_with('+'));
        assert!(lines[23].starts_with('+'));
        assert!(lines[12].starts_with('|'));
        assert!(text.contains("[ Tower Climb ]"));
        assert!(text.contains("[ Operations ]"));
        assert!(text.contains("Start or restart a new game."));
        assert!(text.contains("Time : 30.0"));
        assert!(text.contains("Floor:  1"));
    }

    #[test]
    fn render_places_field_symbols_at_the_field_origin() {
        let mut field_cells = empty_field_cells();
        field_cells[0][0] = FieldCellProps::new(ObjectClass::Wall, FloorClass::Empty);
        field_cells[1][1] = FieldCellProps::new(ObjectClass::Hero, FloorClass::Empty);
        field_cells[11][19] = FieldCellProps::new(ObjectClass::Empty, FloorClass::Upstairs);

        let mut screen = Screen::new();
        screen.render(&props(field_cells));

        let wall = screen.cell_at(GridPos::new(2, 2)).unwrap();
        assert_eq!((wall.symbol(), wall.foreground()), ('#', Color::Yellow));
        let hero = screen.cell_at(GridPos::new(3, 3)).unwrap();
        assert_eq!((hero.symbol(), hero.foreground()), ('@', Color::Magenta));
        let stairs = screen.cell_at(GridPos::new(13, 21)).unwrap();
        assert_eq!((stairs.symbol(), stairs.foreground()), ('<', Color::Green));
    }

    #[test]
    fn rank_message_scales_with_the_floor_reached() {
        assert_eq!(rank_message(1), ("No good...", Color::White));
        assert_eq!(rank_message(2), ("No good...", Color::White));
        assert_eq!(rank_message(3), ("Good!", Color::Green));
        assert_eq!(rank_message(4), ("Excellent!", Color::Green));
        assert_eq!(rank_message(5), ("Marvelous!", Color::Green));
        assert_eq!(rank_message(6), ("Legendary!!", Color::Cyan));
        assert_eq!(rank_message(9), ("Legendary!!", Color::Cyan));
    }

    #[test]
    fn rank_message_appears_only_when_finished() {
        let mut screen = Screen::new();
        let mut finished = props(empty_field_cells());
        finished.floor_number = 4;
        finished.is_finished = true;
        screen.render(&finished);
        assert!(screen.as_text().contains("Excellent!"));

        let mut unfinished = props(empty_field_cells());
        unfinished.floor_number = 4;
        screen.render(&unfinished);
        assert!(!screen.as_text().contains("Excellent!"));
    }
}
