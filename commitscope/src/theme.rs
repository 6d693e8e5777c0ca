//! Color theme system for commitscope.
//!
//! A `Theme` holds named `ratatui::style::Color` fields for every surface the
//! dashboard draws. Two built-in themes are provided:
//!
//! - `dark` uses ANSI 16 colors so it works on any terminal, including
//!   256-color SSH sessions without truecolor.
//! - `observable` is truecolor: orange daytime dots, blue night dots, and
//!   Tableau10 for file types.

use ratatui::style::Color;
use tracing::warn;

/// All color values used across the dashboard panels.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Scatterplot
    /// Commits made between 06:00 and 18:00 local time.
    pub dot_day: Color,
    /// Commits made outside daytime hours.
    pub dot_night: Color,
    /// Commits inside the brush rectangle.
    pub dot_selected: Color,
    /// Outline of the brush rectangle.
    pub brush: Color,
    /// Hour gridlines and their labels.
    pub grid: Color,

    // Narrative
    pub narrative_heading: Color,
    pub narrative_text: Color,
    pub narrative_url: Color,

    /// Categorical palette for file types, indexed by position in the sorted
    /// list of file types and wrapping around.
    pub file_types: [Color; 10],

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_help: Color,
    pub slider_filled: Color,
    pub slider_empty: Color,

    // General
    /// Secondary text: counts, hints, placeholders.
    pub muted: Color,
    /// Load failures.
    pub error: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            dot_day: Color::Yellow,
            dot_night: Color::Blue,
            dot_selected: Color::LightRed,
            brush: Color::White,
            grid: Color::DarkGray,

            narrative_heading: Color::Cyan,
            narrative_text: Color::Reset,
            narrative_url: Color::DarkGray,

            file_types: [
                Color::Blue,
                Color::Yellow,
                Color::Red,
                Color::Cyan,
                Color::Green,
                Color::LightYellow,
                Color::Magenta,
                Color::LightMagenta,
                Color::LightRed,
                Color::Gray,
            ],

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_help: Color::Green,
            slider_filled: Color::Cyan,
            slider_empty: Color::Gray,

            muted: Color::DarkGray,
            error: Color::Red,
        }
    }

    /// Returns the truecolor theme. File-type colors are the Tableau10
    /// categorical palette.
    pub fn observable() -> Self {
        let orange = Color::Rgb(221, 119, 51); // #dd7733
        let blue = Color::Rgb(68, 119, 170); // #4477aa
        let coral = Color::Rgb(255, 107, 107); // #ff6b6b
        let text = Color::Rgb(220, 220, 220);
        let grey = Color::Rgb(110, 110, 110);
        let surface = Color::Rgb(48, 48, 56);

        Self {
            border_active: orange,
            border_inactive: grey,

            dot_day: orange,
            dot_night: blue,
            dot_selected: coral,
            brush: text,
            grid: surface,

            narrative_heading: orange,
            narrative_text: text,
            narrative_url: grey,

            file_types: [
                Color::Rgb(78, 121, 167),  // #4e79a7
                Color::Rgb(242, 142, 44),  // #f28e2c
                Color::Rgb(225, 87, 89),   // #e15759
                Color::Rgb(118, 183, 178), // #76b7b2
                Color::Rgb(89, 161, 79),   // #59a14f
                Color::Rgb(237, 201, 73),  // #edc949
                Color::Rgb(175, 122, 161), // #af7aa1
                Color::Rgb(255, 157, 167), // #ff9da7
                Color::Rgb(156, 117, 95),  // #9c755f
                Color::Rgb(186, 176, 171), // #bab0ab
            ],

            status_bar_bg: surface,
            status_bar_fg: text,
            status_mode_normal: orange,
            status_mode_help: blue,
            slider_filled: orange,
            slider_empty: grey,

            muted: grey,
            error: coral,
        }
    }

    /// Color for the file type at `index` in the dataset's sorted type list.
    pub fn file_type_color(&self, index: usize) -> Color {
        self.file_types[index % self.file_types.len()]
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `observable()` so a typo in config never
    /// prevents startup.
    ///
    /// # Arguments
    ///
    /// * `name` — theme name from config, e.g. `"dark"` or `"observable"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "observable" => Self::observable(),
            "dark" => Self::dark(),
            other => {
                warn!(theme = other, "unknown theme, falling back to 'observable'");
                Self::observable()
            }
        }
    }
}
