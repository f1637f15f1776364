// SPDX-License-Identifier: MPL-2.0
//! Player control icons.
//!
//! Icons are small inline SVGs tinted with the button's text color, so one
//! set works on every theme. Handles are created once and cached in a
//! `OnceLock`.

use crate::ui::design_tokens::sizing;
use iced::widget::svg::{self, Handle, Svg};
use iced::{Length, Theme};
use std::sync::OnceLock;

/// Defines an icon function with a cached handle.
macro_rules! define_icon {
    ($name:ident, $path:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name<'a>() -> Svg<'a, Theme> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            let handle = HANDLE.get_or_init(|| {
                Handle::from_memory(
                    concat!(
                        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path fill="white" d=""#,
                        $path,
                        r#""/></svg>"#
                    )
                    .as_bytes(),
                )
            });
            tinted(handle.clone())
        }
    };
}

fn tinted<'a>(handle: Handle) -> Svg<'a, Theme> {
    Svg::new(handle)
        .width(Length::Fixed(sizing::ICON_MD))
        .height(Length::Fixed(sizing::ICON_MD))
        .style(|_theme, _status| svg::Style {
            color: Some(iced::Color::WHITE),
        })
}

define_icon!(play, "M8 5v14l11-7z", "Play: triangle pointing right.");
define_icon!(pause, "M6 5h4v14H6zm8 0h4v14h-4z", "Pause: two vertical bars.");
define_icon!(
    volume,
    "M3 9v6h4l5 5V4L7 9H3zm13.5 3A4.5 4.5 0 0 0 14 8v8a4.5 4.5 0 0 0 2.5-4z",
    "Speaker with sound waves."
);
define_icon!(
    volume_muted,
    "M3 9v6h4l5 5V4L7 9H3zm13.6 3 2.7-2.7-1.4-1.4-2.7 2.7-2.7-2.7-1.4 1.4 2.7 2.7-2.7 2.7 1.4 1.4 2.7-2.7 2.7 2.7 1.4-1.4z",
    "Speaker with a cross."
);
define_icon!(
    fullscreen,
    "M5 5h5v2H7v3H5zm9 0h5v5h-2V7h-3zM5 14h2v3h3v2H5zm12 0h2v5h-5v-2h3z",
    "Four outward corners."
);
define_icon!(
    fullscreen_exit,
    "M8 5h2v5H5V8h3zm6 0h2v3h3v2h-5zM5 14h5v5H8v-3H5zm9 0h5v2h-3v3h-2z",
    "Four inward corners."
);
