// SPDX-License-Identifier: MPL-2.0
//! Result area: error list, loading skeletons, explanation and video cards.

use crate::application::search::SearchState;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::{markup, player, styles};
use iced::widget::{column, container, rich_text, row, text, Column};
use iced::{Color, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub search: &'a SearchState,
    pub player: &'a player::State,
    /// Color of inline math in the explanation.
    pub math_color: Color,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, player::Message> {
    let mut content = Column::new().spacing(spacing::LG).width(Length::Fill);

    if let Some(errors) = ctx.search.error_text() {
        content = content.push(error_area(ctx.i18n, errors));
    }

    if ctx.search.query().is_some() {
        let layout = Layout::of(ctx.search);
        let explanation = match layout.explanation {
            Panel::Skeleton => text_skeleton(ctx.i18n),
            Panel::Content => explanation_card(
                ctx.i18n,
                ctx.search.result().explanation.as_deref(),
                ctx.math_color,
            ),
        };
        let video = match layout.video {
            Panel::Skeleton => video_skeleton(ctx.i18n),
            Panel::Content => video_card(ctx.i18n, ctx.player),
        };
        content = content.push(row![explanation, video].spacing(spacing::LG));
    }

    content.into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Skeleton,
    Content,
}

/// Each panel leaves its skeleton as soon as its own task settles, so a
/// loaded video is never hidden behind a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    explanation: Panel,
    video: Panel,
}

impl Layout {
    fn of(search: &SearchState) -> Self {
        let panel = |pending: bool| if pending { Panel::Skeleton } else { Panel::Content };
        Self {
            explanation: panel(search.explanation_pending()),
            video: panel(search.video_pending()),
        }
    }
}

fn error_area<'a>(i18n: &I18n, errors: String) -> Element<'a, player::Message> {
    container(
        column![
            text(i18n.tr("errors-title")).size(typography::BODY_LG),
            text(errors).size(typography::BODY),
        ]
        .spacing(spacing::XXS),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::container::error_banner)
    .into()
}

fn card<'a>(
    title: String,
    body: impl Into<Element<'a, player::Message>>,
) -> Element<'a, player::Message> {
    container(
        column![text(title).size(typography::TITLE_SM), body.into()].spacing(spacing::SM),
    )
    .padding(spacing::MD)
    .width(Length::FillPortion(1))
    .style(styles::container::card)
    .into()
}

fn explanation_card<'a>(
    i18n: &I18n,
    explanation: Option<&str>,
    math_color: Color,
) -> Element<'a, player::Message> {
    let body: Element<'a, player::Message> = match explanation {
        Some(explanation) => rich_text(markup::spans(&markup::parse(explanation), math_color))
            .size(typography::BODY_LG)
            .width(Length::Fill)
            .into(),
        None => text(i18n.tr("explanation-unavailable"))
            .size(typography::BODY)
            .into(),
    };
    card(i18n.tr("explanation-title"), body)
}

fn video_card<'a>(i18n: &'a I18n, player: &'a player::State) -> Element<'a, player::Message> {
    let body: Element<'a, player::Message> = if player.has_video() {
        player.view(i18n, false)
    } else {
        text(i18n.tr("video-unavailable"))
            .size(typography::BODY)
            .into()
    };
    card(i18n.tr("video-title"), body)
}

fn text_skeleton<'a>(i18n: &I18n) -> Element<'a, player::Message> {
    // Ragged line widths, like a paragraph.
    let lines = [12, 11, 12, 9, 12, 7].into_iter().map(|portion| {
        row![
            skeleton_bar(Length::FillPortion(portion)),
            Column::new().width(Length::FillPortion(12 - portion + 1)),
        ]
        .into()
    });
    card(
        i18n.tr("explanation-loading"),
        Column::with_children(lines).spacing(spacing::XS),
    )
}

fn video_skeleton<'a>(i18n: &I18n) -> Element<'a, player::Message> {
    card(
        i18n.tr("video-loading"),
        container(Column::new())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PLAYER_HEIGHT))
            .style(styles::container::skeleton),
    )
}

fn skeleton_bar<'a>(width: Length) -> Element<'a, player::Message> {
    container(Column::new())
        .width(width)
        .height(Length::Fixed(sizing::SKELETON_LINE))
        .style(styles::container::skeleton)
        .into()
}
