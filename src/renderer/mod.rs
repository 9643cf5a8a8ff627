//! Rendering collaborator
//!
//! Thin canvas-2d drawing of the simulation state: background, sprites (or
//! their placeholder colors), nothing else. The HUD and overlays are DOM
//! elements owned by the front end, not drawn here.

#[cfg(target_arch = "wasm32")]
mod canvas {
    use glam::Vec2;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use crate::assets::{AssetStore, SpriteKind};
    use crate::consts::*;
    use crate::sim::{GameState, ShotOwner};

    pub struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        assets: AssetStore,
        starfield: bool,
    }

    impl CanvasRenderer {
        pub fn new(
            canvas: &HtmlCanvasElement,
            assets: AssetStore,
            starfield: bool,
        ) -> Result<Self, JsValue> {
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("no 2d context"))?
                .dyn_into::<CanvasRenderingContext2d>()?;
            Ok(Self {
                ctx,
                assets,
                starfield,
            })
        }

        /// Draw one frame of the given state
        pub fn render(&self, state: &GameState) {
            self.ctx.set_fill_style_str("#10101c");
            self.ctx
                .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

            if self.starfield {
                self.draw_starfield();
            }

            for enemy in &state.enemies {
                self.draw_sprite(SpriteKind::EnemyShip, enemy.pos, ENEMY_SIZE);
            }
            for shot in &state.shots {
                let kind = match shot.owner {
                    ShotOwner::Player => SpriteKind::PlayerShot,
                    ShotOwner::Enemy => SpriteKind::EnemyShot,
                };
                self.draw_sprite(kind, shot.pos, shot.size());
            }
            self.draw_sprite(SpriteKind::PlayerShip, state.player.pos, PLAYER_SIZE);
        }

        fn draw_sprite(&self, kind: SpriteKind, pos: Vec2, size: Vec2) {
            if let Some(image) = self.assets.image(kind) {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    pos.x as f64,
                    pos.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
            } else {
                self.ctx.set_fill_style_str(kind.placeholder_color());
                self.ctx
                    .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
        }

        /// Fixed hash-scattered star dots; deterministic so the backdrop
        /// doesn't shimmer between frames
        fn draw_starfield(&self) {
            self.ctx.set_fill_style_str("#2e2e44");
            for i in 0u32..70 {
                let hash = i.wrapping_mul(2654435761).wrapping_add(i * 7919);
                let x = (hash % FIELD_WIDTH as u32) as f64;
                let y = ((hash >> 11) % FIELD_HEIGHT as u32) as f64;
                let size = 1.0 + (hash >> 22 & 1) as f64;
                self.ctx.fill_rect(x, y, size, size);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
