//! Canvas 2D backend
//!
//! Replays a [`DrawCommand`] list on a `CanvasRenderingContext2d`. The host
//! has already scaled the context for the device pixel ratio, so everything
//! here is in logical units.

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::commands::DrawCommand;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, sprite: HtmlImageElement) -> Self {
        // Pixel-art sprite
        ctx.set_image_smoothing_enabled(false);
        Self { ctx, sprite }
    }

    /// Draw a frame. Individual draw failures are ignored; a missing sprite
    /// simply leaves a gap.
    pub fn draw(&self, frame: &[DrawCommand]) {
        for command in frame {
            self.draw_one(command);
        }
    }

    fn draw_one(&self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { size } => {
                ctx.clear_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
            }
            DrawCommand::FillGradient { pos, size, top, bottom } => {
                let (x, y) = (f64::from(pos.x), f64::from(pos.y));
                let gradient = ctx.create_linear_gradient(x, y, x, y + f64::from(size.y));
                gradient.add_color_stop(0.0, &top.to_css()).ok();
                gradient.add_color_stop(1.0, &bottom.to_css()).ok();
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(x, y, f64::from(size.x), f64::from(size.y));
            }
            DrawCommand::FillRect { pos, size, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(
                    f64::from(pos.x),
                    f64::from(pos.y),
                    f64::from(size.x),
                    f64::from(size.y),
                );
            }
            DrawCommand::FillCircle { center, radius, color } => {
                ctx.set_fill_style_str(&color.to_css());
                self.circle_path(center.x, center.y, *radius);
                ctx.fill();
            }
            DrawCommand::Glow { center, inner, outer, color } => {
                let (x, y) = (f64::from(center.x), f64::from(center.y));
                let Ok(gradient) =
                    ctx.create_radial_gradient(x, y, f64::from(*inner), x, y, f64::from(*outer))
                else {
                    return;
                };
                gradient.add_color_stop(0.0, &color.to_css()).ok();
                gradient
                    .add_color_stop(1.0, &color.with_alpha(0.0).to_css())
                    .ok();
                ctx.set_fill_style_canvas_gradient(&gradient);
                self.circle_path(center.x, center.y, *outer);
                ctx.fill();
            }
            DrawCommand::Text { text, pos, size_px, color, align } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_font(&format!("{size_px}px Arial"));
                ctx.set_text_align(align.as_str());
                ctx.fill_text(text, f64::from(pos.x), f64::from(pos.y)).ok();
            }
            DrawCommand::Sprite { pos, size } => {
                if self.sprite.complete() && self.sprite.natural_width() > 0 {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &self.sprite,
                        f64::from(pos.x),
                        f64::from(pos.y),
                        f64::from(size.x),
                        f64::from(size.y),
                    )
                    .ok();
                }
            }
        }
    }

    fn circle_path(&self, x: f32, y: f32, radius: f32) {
        self.ctx.begin_path();
        self.ctx
            .arc(f64::from(x), f64::from(y), f64::from(radius), 0.0, TAU)
            .ok();
        self.ctx.close_path();
    }
}
