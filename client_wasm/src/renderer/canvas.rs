use match_core::{MatchPhase, PlayArea, Renderer, Snapshot};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "#000000";
const FOREGROUND: &str = "#ffffff";
const NET_SEGMENT: f64 = 12.0;

/// Flat 2D view drawn with the canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn draw_net(&self, area: &PlayArea) {
        let x = area.width as f64 / 2.0 - 1.0;
        let mut y = area.y as f64;
        while y < (area.y + area.height) as f64 {
            self.ctx.fill_rect(x, y, 2.0, NET_SEGMENT / 2.0);
            y += NET_SEGMENT;
        }
    }

    fn draw_text(&self, text: &str, x: f64, y: f64, align: &str) {
        self.ctx.set_text_align(align);
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, frame: &Snapshot<'_>) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        ctx.set_fill_style_str(FOREGROUND);
        self.draw_net(&frame.area);

        for rect in [frame.left_paddle, frame.right_paddle, frame.ball] {
            let size = rect.size();
            ctx.fill_rect(
                rect.min.x as f64,
                rect.min.y as f64,
                size.x as f64,
                size.y as f64,
            );
        }

        // Score bar sits in the strip above the play area when there is one
        let text_y = if frame.area.y >= 24.0 {
            frame.area.y as f64 - 8.0
        } else {
            24.0
        };
        let mid = frame.area.width as f64 / 2.0;
        ctx.set_font("20px monospace");
        self.draw_text(
            &format!("{} {}", frame.left_player, frame.score.left),
            mid - 24.0,
            text_y,
            "right",
        );
        self.draw_text(
            &format!("{} {}", frame.score.right, frame.right_player),
            mid + 24.0,
            text_y,
            "left",
        );

        if frame.phase == MatchPhase::Stopped {
            self.draw_text("stopped", mid, self.height / 2.0, "center");
        }
    }

    fn resize(&mut self, area: &PlayArea) {
        self.width = area.width as f64;
        self.height = (area.y + area.height) as f64;
    }
}
