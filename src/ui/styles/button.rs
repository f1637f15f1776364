// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use super::scheme;
use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Search button.
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let colors = scheme(theme);
    let background = match status {
        button::Status::Hovered => palette::INDIGO_700,
        button::Status::Disabled => Color {
            a: opacity::OVERLAY_MEDIUM,
            ..colors.brand_primary
        },
        button::Status::Active | button::Status::Pressed => colors.brand_primary,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::WHITE,
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// History chip.
pub fn chip(theme: &Theme, status: button::Status) -> button::Style {
    let colors = scheme(theme);
    let border_color = match status {
        button::Status::Hovered | button::Status::Pressed => colors.brand_primary,
        _ => colors.placeholder,
    };
    button::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: if status == button::Status::Disabled {
            colors.text_secondary
        } else {
            colors.text_primary
        },
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::FULL.into(),
        },
        ..Default::default()
    }
}

/// "Clear history" chip.
pub fn chip_danger(theme: &Theme, status: button::Status) -> button::Style {
    let colors = scheme(theme);
    button::Style {
        text_color: colors.error,
        border: Border {
            color: colors.error,
            width: if status == button::Status::Hovered {
                2.0
            } else {
                1.0
            },
            radius: radius::FULL.into(),
        },
        ..chip(theme, status)
    }
}

/// Icon buttons on the player's control strip.
pub fn control(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_MEDIUM,
        button::Status::Pressed => opacity::OVERLAY_STRONG,
        _ => opacity::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..palette::WHITE
        })),
        text_color: if status == button::Status::Disabled {
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::WHITE
            }
        } else {
            palette::WHITE
        },
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theming::{to_iced_theme, ThemeMode};

    #[test]
    fn disabled_primary_is_translucent() {
        let theme = to_iced_theme(ThemeMode::Light);
        let style = primary(&theme, button::Status::Disabled);
        match style.background {
            Some(Background::Color(color)) => assert!(color.a < 1.0),
            _ => panic!("expected a color background"),
        }
    }

    #[test]
    fn control_buttons_are_invisible_until_hovered() {
        let theme = to_iced_theme(ThemeMode::Dark);
        let idle = control(&theme, button::Status::Active);
        let hovered = control(&theme, button::Status::Hovered);
        assert!(matches!(idle.background, Some(Background::Color(c)) if c.a == 0.0));
        assert!(matches!(hovered.background, Some(Background::Color(c)) if c.a > 0.0));
    }
}
