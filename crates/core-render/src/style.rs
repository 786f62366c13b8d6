//! Highlight class to terminal color mapping.

use core_syntax::Highlight;
use crossterm::style::Color;

/// Foreground color for one highlight class. `Normal` resets to the
/// terminal's default instead of forcing white.
pub fn color_for(hl: Highlight) -> Color {
    match hl {
        Highlight::Normal => Color::Reset,
        Highlight::Number => Color::DarkMagenta,
        Highlight::String => Color::DarkYellow,
        Highlight::Match => Color::DarkBlue,
        Highlight::Comment | Highlight::MultilineComment => Color::DarkMagenta,
        Highlight::Keyword1 => Color::DarkRed,
        Highlight::Keyword2 => Color::DarkCyan,
        Highlight::Function => Color::DarkGreen,
    }
}

/// Line-number gutter color (bright blue).
pub const GUTTER_COLOR: Color = Color::Blue;
