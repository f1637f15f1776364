// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! In windowed mode the page stacks notices, the search bar and the
//! results. In fullscreen mode only the player is rendered.

use super::Message;
use crate::application::history::HistoryStore;
use crate::application::search::SearchState;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::theming::ColorScheme;
use crate::ui::{player, results, search_bar, styles};
use iced::widget::{button, container, row, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub query: &'a str,
    pub search: &'a SearchState,
    pub history: &'a HistoryStore,
    pub player: &'a player::State,
    pub notices: &'a [String],
    pub colors: ColorScheme,
    pub fullscreen: bool,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    if ctx.fullscreen && ctx.player.has_video() {
        return container(ctx.player.view(ctx.i18n, true).map(Message::Player))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::player_surface)
            .into();
    }

    let mut page = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::XL)
        .width(Length::Fill)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .align_x(Alignment::Center);

    for (index, key) in ctx.notices.iter().enumerate() {
        page = page.push(notice(ctx.i18n, index, key));
    }

    page = page.push(
        search_bar::view(search_bar::ViewContext {
            i18n: ctx.i18n,
            query: ctx.query,
            in_flight: ctx.search.is_in_flight(),
            history: ctx.history.entries(),
        })
        .map(Message::SearchBar),
    );

    page = page.push(
        results::view(results::ViewContext {
            i18n: ctx.i18n,
            search: ctx.search,
            player: ctx.player,
            math_color: ctx.colors.math,
        })
        .map(Message::Player),
    );

    scrollable(container(page).center_x(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn notice<'a>(i18n: &I18n, index: usize, key: &str) -> Element<'a, Message> {
    container(
        row![
            text(i18n.tr(key)).size(typography::BODY),
            Space::new().width(Length::Fill),
            button(text(i18n.tr("notice-dismiss")).size(typography::CAPTION))
                .on_press(Message::DismissNotice(index))
                .style(styles::button::chip),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::container::notice)
    .into()
}
