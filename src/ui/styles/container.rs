// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use super::scheme;
use crate::ui::design_tokens::{palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Result card (explanation, video).
pub fn card(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: Some(colors.text_primary),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Multi-line error area above the results.
pub fn error_banner(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.error_surface)),
        text_color: Some(colors.text_primary),
        border: Border {
            color: colors.error,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Dismissable warning strip (settings or history problems).
pub fn notice(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.15,
            ..colors.warning
        })),
        text_color: Some(colors.text_primary),
        border: Border {
            color: colors.warning,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Pulsing-free skeleton bar shown while a result is loading.
pub fn skeleton(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(scheme(theme).placeholder)),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Letterbox behind video frames.
pub fn player_surface(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BLACK)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Translucent strip behind player overlays and controls.
pub fn overlay(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.overlay_background)),
        text_color: Some(colors.overlay_text),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
