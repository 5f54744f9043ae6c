//! Image asset loading (wasm)
//!
//! A fixed set of named sprites fetched by URL at construction. Load and
//! error callbacks both count toward the resolved threshold so a missing
//! file never wedges the loading gate; the affected sprite just degrades
//! to a skipped draw.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlImageElement;

/// Sprite names, resolved against the base path as `{base}/{name}.png`
pub const ASSET_NAMES: [&str; 6] = ["bg", "ground", "char", "rock_a", "rock_b", "plant"];

pub struct Assets {
    images: HashMap<&'static str, HtmlImageElement>,
    resolved: Rc<Cell<usize>>,
}

impl Assets {
    /// Kick off all image fetches. Poll `ready` before starting the game.
    pub fn load(base_path: &str) -> Self {
        let resolved = Rc::new(Cell::new(0usize));
        let mut images = HashMap::new();

        for name in ASSET_NAMES {
            let img = HtmlImageElement::new().expect("failed to create image element");

            {
                let resolved = resolved.clone();
                let onload = Closure::<dyn FnMut()>::new(move || {
                    resolved.set(resolved.get() + 1);
                });
                img.set_onload(Some(onload.as_ref().unchecked_ref()));
                onload.forget();
            }
            {
                let resolved = resolved.clone();
                let onerror = Closure::<dyn FnMut()>::new(move || {
                    log::error!("Failed to load image: {}.png", name);
                    resolved.set(resolved.get() + 1);
                });
                img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
                onerror.forget();
            }

            img.set_src(&format!("{}/{}.png", base_path, name));
            images.insert(name, img);
        }

        Self { images, resolved }
    }

    /// True once every image has loaded or errored
    pub fn ready(&self) -> bool {
        self.resolved.get() >= ASSET_NAMES.len()
    }

    /// Drawable image by name. `None` while loading or after a load
    /// error, so callers skip the draw.
    pub fn get(&self, name: &str) -> Option<&HtmlImageElement> {
        self.images
            .get(name)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}
