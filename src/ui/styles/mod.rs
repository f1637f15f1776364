// SPDX-License-Identifier: MPL-2.0
//! Widget style functions, derived from the active theme's [`ColorScheme`].

pub mod button;
pub mod container;

use crate::ui::theming::ColorScheme;
use iced::Theme;

/// Color scheme matching an iced theme built by [`crate::ui::theming::to_iced_theme`].
pub(crate) fn scheme(theme: &Theme) -> ColorScheme {
    if theme.extended_palette().is_dark {
        ColorScheme::dark()
    } else {
        ColorScheme::light()
    }
}
