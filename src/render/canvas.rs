//! Canvas 2D painter for the browser build

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::{AssetStatus, Color, DrawCommand, Sprite, TextAlign};

/// CSS colour string for a fill or stroke style
fn css(color: Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

/// Paints draw lists onto a 2D context, holding the sprite images
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    ball: HtmlImageElement,
    keeper: HtmlImageElement,
    goal: HtmlImageElement,
}

impl CanvasPainter {
    /// Start loading the sprites; painting works before they arrive
    pub fn new(ctx: CanvasRenderingContext2d) -> Result<Self, JsValue> {
        let load = |src: &str| -> Result<HtmlImageElement, JsValue> {
            let img = HtmlImageElement::new()?;
            img.set_src(src);
            Ok(img)
        };
        Ok(Self {
            ctx,
            ball: load("ball.png")?,
            keeper: load("goalkeeper.png")?,
            goal: load("goal.png")?,
        })
    }

    fn image(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::Ball => &self.ball,
            Sprite::Keeper => &self.keeper,
            Sprite::Goal => &self.goal,
        }
    }

    /// Sample which images are usable this frame
    pub fn assets(&self) -> AssetStatus {
        // A failed load is also "complete", but with no pixels
        let ready = |img: &HtmlImageElement| img.complete() && img.natural_width() > 0;
        AssetStatus {
            ball: ready(&self.ball),
            keeper: ready(&self.keeper),
            goal: ready(&self.goal),
        }
    }

    pub fn paint(&self, width: f64, height: f64, commands: &[DrawCommand]) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, width, height);

        for cmd in commands {
            match cmd {
                DrawCommand::FillRect { min, size, color } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::StrokeRect {
                    min,
                    size,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&css(*color));
                    ctx.set_line_width(*width as f64);
                    ctx.stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                }
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&css(*color));
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.stroke();
                }
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&css(*color));
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                DrawCommand::Sprite { sprite, min, size } => {
                    if let Err(e) = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        self.image(*sprite),
                        min.x as f64,
                        min.y as f64,
                        size.x as f64,
                        size.y as f64,
                    ) {
                        log::warn!("Failed to draw {:?}: {:?}", sprite, e);
                    }
                }
                DrawCommand::Text {
                    pos,
                    text,
                    size,
                    color,
                    align,
                } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.set_font(&format!("bold {}px sans-serif", size));
                    ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                    });
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }
}
