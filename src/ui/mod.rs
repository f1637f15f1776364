// SPDX-License-Identifier: MPL-2.0
//! User interface: search bar, result cards and the video player.

pub mod design_tokens;
pub mod icons;
pub mod markup;
pub mod player;
pub mod player_controls;
pub mod results;
pub mod search_bar;
pub mod styles;
pub mod theming;
pub mod widgets;
