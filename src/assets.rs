//! Sprite assets
//!
//! Images load asynchronously before the start screen unlocks; a sprite that
//! fails to load is replaced by a solid placeholder color and the game starts
//! anyway. Loading never blocks on success.

/// Every sprite the renderer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    PlayerShip,
    EnemyShip,
    PlayerShot,
    EnemyShot,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 4] = [
        SpriteKind::PlayerShip,
        SpriteKind::EnemyShip,
        SpriteKind::PlayerShot,
        SpriteKind::EnemyShot,
    ];

    /// Image source path, relative to the page
    pub fn source(&self) -> &'static str {
        match self {
            SpriteKind::PlayerShip => "assets/player.png",
            SpriteKind::EnemyShip => "assets/enemy.png",
            SpriteKind::PlayerShot => "assets/player_shot.png",
            SpriteKind::EnemyShot => "assets/enemy_shot.png",
        }
    }

    /// Fill color used when the image failed to load
    pub fn placeholder_color(&self) -> &'static str {
        match self {
            SpriteKind::PlayerShip => "#4caf50",
            SpriteKind::EnemyShip => "#e53935",
            SpriteKind::PlayerShot => "#ffee58",
            SpriteKind::EnemyShot => "#ff7043",
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod store {
    use super::SpriteKind;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    /// Loaded sprites, one slot per kind. A `None` slot means the image
    /// failed and the placeholder color applies.
    pub struct AssetStore {
        images: Vec<(SpriteKind, Option<HtmlImageElement>)>,
        resolved: bool,
    }

    impl AssetStore {
        /// Load every sprite, resolving each slot as loaded-or-failed.
        /// Returns only after all slots are resolved; this is the ordering
        /// guarantee the start screen waits on.
        pub async fn load_all() -> Self {
            let mut images = Vec::with_capacity(SpriteKind::ALL.len());
            for kind in SpriteKind::ALL {
                let image = load_image(kind.source()).await;
                if image.is_none() {
                    log::warn!(
                        "Sprite {} failed to load, using placeholder",
                        kind.source()
                    );
                }
                images.push((kind, image));
            }
            log::info!("All {} sprites resolved", SpriteKind::ALL.len());
            Self {
                images,
                resolved: true,
            }
        }

        pub fn image(&self, kind: SpriteKind) -> Option<&HtmlImageElement> {
            self.images
                .iter()
                .find(|(k, _)| *k == kind)
                .and_then(|(_, image)| image.as_ref())
        }

        pub fn all_resolved(&self) -> bool {
            self.resolved
        }
    }

    /// Resolve to the element on load, `None` on error
    async fn load_image(path: &str) -> Option<HtmlImageElement> {
        let image = HtmlImageElement::new().ok()?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(path);
        match JsFuture::from(promise).await {
            Ok(_) => Some(image),
            Err(_) => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use store::AssetStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sprite_has_a_placeholder() {
        for kind in SpriteKind::ALL {
            assert!(kind.placeholder_color().starts_with('#'));
            assert!(!kind.source().is_empty());
        }
    }
}
