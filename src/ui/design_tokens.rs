// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Every color, spacing and size the interface uses comes from here.

## Organization

- **Palette**: Base colors
- **Opacity**: Overlay and placeholder transparency
- **Spacing**: Spacing scale (4px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Radius**: Border radii

## Examples

```
use mathlens::ui::design_tokens::{opacity, palette, spacing};
use iced::Color;

let scrim = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::BLACK
};
let gap = spacing::MD;
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const SLATE_950: Color = Color::from_rgb(0.06, 0.07, 0.09);
    pub const SLATE_900: Color = Color::from_rgb(0.1, 0.11, 0.14);
    pub const SLATE_800: Color = Color::from_rgb(0.16, 0.18, 0.22);
    pub const SLATE_600: Color = Color::from_rgb(0.36, 0.4, 0.47);
    pub const SLATE_300: Color = Color::from_rgb(0.8, 0.83, 0.88);
    pub const SLATE_100: Color = Color::from_rgb(0.94, 0.95, 0.97);

    // Brand colors (indigo scale)
    pub const INDIGO_300: Color = Color::from_rgb(0.65, 0.7, 0.99);
    pub const INDIGO_500: Color = Color::from_rgb(0.39, 0.4, 0.95);
    pub const INDIGO_700: Color = Color::from_rgb(0.26, 0.22, 0.79);

    // Math accent
    pub const AMBER_400: Color = Color::from_rgb(0.98, 0.75, 0.14);
    pub const AMBER_700: Color = Color::from_rgb(0.71, 0.33, 0.04);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const ERROR_100: Color = Color::from_rgb(0.99, 0.89, 0.89);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const PLACEHOLDER: f32 = 0.35;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (4px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 20.0;

    pub const INPUT_HEIGHT: f32 = 40.0;
    pub const SEARCH_MAX_WIDTH: f32 = 720.0;
    pub const CONTENT_MAX_WIDTH: f32 = 1200.0;

    /// Height reserved for the player before the first frame arrives.
    pub const PLAYER_HEIGHT: f32 = 320.0;
    pub const VOLUME_SLIDER_WIDTH: f32 = 90.0;
    pub const SPINNER: f32 = 48.0;

    /// Skeleton bar heights.
    pub const SKELETON_LINE: f32 = 14.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// App title above the search bar.
    pub const TITLE_LG: f32 = 30.0;

    /// Card headings.
    pub const TITLE_SM: f32 = 18.0;

    /// Explanation text.
    pub const BODY_LG: f32 = 16.0;

    pub const BODY: f32 = 14.0;

    /// Timestamps, chips.
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);
    assert!(spacing::XL > spacing::LG);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::PLACEHOLDER < opacity::OVERLAY_MEDIUM);

    assert!(typography::TITLE_LG > typography::TITLE_SM);
    assert!(typography::BODY_LG > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);

    assert!(radius::MD > radius::SM);

    assert!(sizing::CONTENT_MAX_WIDTH > sizing::SEARCH_MAX_WIDTH);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_follows_grid() {
        for value in [
            spacing::XXS,
            spacing::XS,
            spacing::SM,
            spacing::MD,
            spacing::LG,
            spacing::XL,
        ] {
            assert_eq!(value % spacing::XXS, 0.0);
        }
    }
}
