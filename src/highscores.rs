//! Best-score persistence
//!
//! A single scalar stored as an integer string in LocalStorage under a
//! fixed key. Read once at session start, written only when exceeded.
//! The only state that outlives a browser session.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "canyon-dash-high-score";

/// Load the persisted best score, 0 when absent or unreadable (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u64 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            if let Ok(score) = raw.parse::<u64>() {
                log::info!("Loaded high score: {}", score);
                return score;
            }
            log::warn!("Unparseable high score entry, starting fresh");
        }
    }

    0
}

/// Persist a new best score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(score: u64) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &score.to_string());
        log::info!("High score saved: {}", score);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u64 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u64) {
    // No-op for native
}
