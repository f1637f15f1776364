// SPDX-License-Identifier: MPL-2.0
//! Rotating arc drawn on a canvas, used while the video loads.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Radians added per animation tick.
pub const ROTATION_STEP: f32 = 0.15;

const ARC_SEGMENTS: u16 = 30;
const STROKE_WIDTH: f32 = 3.0;

/// Advances a rotation angle by one tick, wrapping at a full turn.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    (rotation + ROTATION_STEP) % TAU
}

pub struct AnimatedSpinner {
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            rotation,
            color,
            size: sizing::SPINNER,
        }
    }

    pub fn into_element<'a, Message: 'a>(self) -> iced::Element<'a, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - 4.0;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                a: 0.25,
                ..self.color
            }),
        );

        // Half-circle arc, starting at the top.
        let start_angle = self.rotation - PI / 2.0;
        let mut arc = canvas::path::Builder::new();
        arc.move_to(point_on_circle(center, radius, start_angle));
        for i in 1..=ARC_SEGMENTS {
            let t = f32::from(i) / f32::from(ARC_SEGMENTS);
            arc.line_to(point_on_circle(center, radius, start_angle + PI * t));
        }

        frame.stroke(
            &arc.build(),
            Stroke::default()
                .with_width(STROKE_WIDTH)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

fn point_on_circle(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn advance_wraps_after_full_turn() {
        assert_abs_diff_eq!(advance(0.0), ROTATION_STEP);
        assert!(advance(TAU - 0.01) < ROTATION_STEP);
    }

    #[test]
    fn points_lie_on_the_circle() {
        let p = point_on_circle(Point::new(10.0, 10.0), 5.0, 0.0);
        assert_abs_diff_eq!(p.x, 15.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 10.0, epsilon = 1e-5);
    }
}
