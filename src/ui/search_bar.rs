// SPDX-License-Identifier: MPL-2.0
//! Search bar: title, query input, search button and history chips.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, row, text, text_input, Row};
use iced::{Alignment, Element, Length};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    QueryChanged(String),
    Submit,
    /// A history chip was clicked: set the query and submit it.
    HistorySelected(String),
    ClearHistory,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub query: &'a str,
    pub in_flight: bool,
    pub history: &'a [String],
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let idle = !ctx.in_flight;

    let title = text(i18n.tr("search-title")).size(typography::TITLE_LG);

    let mut input = text_input(&i18n.tr("search-placeholder"), ctx.query)
        .padding(spacing::SM)
        .size(typography::BODY_LG)
        .width(Length::Fill);
    if idle {
        input = input
            .on_input(Message::QueryChanged)
            .on_submit(Message::Submit);
    }

    let label = if ctx.in_flight {
        i18n.tr("search-button-searching")
    } else {
        i18n.tr("search-button")
    };
    let can_submit = idle && !ctx.query.trim().is_empty();
    let search_button = button(text(label).size(typography::BODY))
        .on_press_maybe(can_submit.then_some(Message::Submit))
        .padding([spacing::XS, spacing::MD])
        .height(Length::Fixed(sizing::INPUT_HEIGHT))
        .style(styles::button::primary);

    let input_row = row![input, search_button]
        .spacing(spacing::XS)
        .align_y(Alignment::Center);

    let mut content = column![title, input_row]
        .spacing(spacing::MD)
        .align_x(Alignment::Center)
        .max_width(sizing::SEARCH_MAX_WIDTH);

    if !ctx.history.is_empty() {
        content = content.push(history_chips(ctx.i18n, ctx.history, idle));
    }

    content.into()
}

fn history_chips<'a>(i18n: &I18n, history: &'a [String], idle: bool) -> Element<'a, Message> {
    let mut chips = Row::new().push(text(i18n.tr("history-label")).size(typography::CAPTION));

    for entry in history {
        chips = chips.push(
            button(text(entry.as_str()).size(typography::CAPTION))
                .on_press_maybe(idle.then(|| Message::HistorySelected(entry.clone())))
                .padding([spacing::XXS, spacing::SM])
                .style(styles::button::chip),
        );
    }

    chips
        .push(
            button(text(i18n.tr("history-clear")).size(typography::CAPTION))
                .on_press_maybe(idle.then_some(Message::ClearHistory))
                .padding([spacing::XXS, spacing::SM])
                .style(styles::button::chip_danger),
        )
        .spacing(spacing::XS)
        .align_y(Alignment::Center)
        .wrap()
        .into()
}
