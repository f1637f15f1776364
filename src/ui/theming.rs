// SPDX-License-Identifier: MPL-2.0
//! Light, dark and system theme handling.

use crate::ui::design_tokens::{opacity, palette};
use iced::theme::Palette;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub surface_primary: Color,
    pub surface_secondary: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub brand_primary: Color,
    /// Inline math in explanations.
    pub math: Color,
    pub error: Color,
    pub error_surface: Color,
    pub warning: Color,
    pub placeholder: Color,
    pub overlay_background: Color,
    pub overlay_text: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::WHITE,
            surface_secondary: palette::SLATE_100,
            text_primary: palette::SLATE_900,
            text_secondary: palette::SLATE_600,
            brand_primary: palette::INDIGO_500,
            math: palette::AMBER_700,
            error: palette::ERROR_500,
            error_surface: palette::ERROR_100,
            warning: palette::WARNING_500,
            placeholder: Color {
                a: opacity::PLACEHOLDER,
                ..palette::SLATE_300
            },
            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::SLATE_950,
            surface_secondary: palette::SLATE_800,
            text_primary: palette::SLATE_100,
            text_secondary: palette::SLATE_300,
            brand_primary: palette::INDIGO_300,
            math: palette::AMBER_400,
            error: palette::ERROR_500,
            error_surface: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::ERROR_500
            },
            warning: palette::WARNING_500,
            placeholder: Color {
                a: opacity::PLACEHOLDER,
                ..palette::SLATE_600
            },
            overlay_background: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }

    /// Scheme matching the effective mode.
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        if mode.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            // Dark on detection error.
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }
}

/// Builds the iced theme for a mode.
#[must_use]
pub fn to_iced_theme(mode: ThemeMode) -> Theme {
    let scheme = ColorScheme::for_mode(mode);
    let name = if mode.is_dark() {
        "Mathlens Dark"
    } else {
        "Mathlens Light"
    };
    Theme::custom(
        name.to_string(),
        Palette {
            background: scheme.surface_primary,
            text: scheme.text_primary,
            primary: scheme.brand_primary,
            success: palette::INDIGO_700,
            warning: scheme.warning,
            danger: scheme.error,
        },
    )
}
