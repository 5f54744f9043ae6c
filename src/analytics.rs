//! Fire-and-forget telemetry collector
//!
//! The simulation queues typed `GameEvent`s; the host drains them here
//! each frame. On wasm each event is serialized to JSON (tagged with the
//! game name) and posted via `navigator.sendBeacon`, which queues the
//! request without blocking the frame. Delivery failures are logged at
//! debug level and never surfaced to the player.

use crate::sim::GameEvent;

/// Identifier attached to every payload
pub const GAME_NAME: &str = "canyon_dash";

/// Telemetry sink bound to a collector endpoint. A `None` endpoint
/// disables sending entirely (events are still drained and dropped).
#[derive(Debug, Clone)]
pub struct Collector {
    endpoint: Option<String>,
}

impl Collector {
    pub fn new(endpoint: Option<String>) -> Self {
        match &endpoint {
            Some(url) => log::info!("Telemetry enabled, collector: {}", url),
            None => log::info!("Telemetry disabled (no collector endpoint)"),
        }
        Self { endpoint }
    }

    pub fn enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Serialize an event with the game-name tag attached
    fn payload(&self, event: &GameEvent) -> Option<String> {
        let mut value = match serde_json::to_value(event) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("Failed to serialize telemetry event: {}", err);
                return None;
            }
        };
        if let Some(object) = value.as_object_mut() {
            object.insert("game_name".into(), GAME_NAME.into());
        }
        Some(value.to_string())
    }

    /// Queue one event for delivery (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn send(&self, event: &GameEvent) {
        let Some(url) = &self.endpoint else {
            return;
        };
        let Some(json) = self.payload(event) else {
            return;
        };

        let Some(window) = web_sys::window() else {
            return;
        };
        match window.navigator().send_beacon_with_opt_str(url, Some(&json)) {
            Ok(true) => {}
            Ok(false) => log::debug!("Telemetry beacon rejected (queue full?)"),
            Err(_) => log::debug!("Telemetry beacon failed"),
        }
    }

    /// Native stub: log the payload instead of sending
    #[cfg(not(target_arch = "wasm32"))]
    pub fn send(&self, event: &GameEvent) {
        if let Some(json) = self.payload(event) {
            log::debug!("telemetry: {}", json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{JumpKind, PowerUpKind};

    #[test]
    fn test_payload_carries_event_tag_and_game_name() {
        let collector = Collector::new(Some("/collect".into()));
        let event = GameEvent::PlayerJumped {
            jump_type: JumpKind::Double,
            score: 120,
            total_jumps: 7,
        };

        let json = collector.payload(&event).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "player_jumped");
        assert_eq!(value["game_name"], GAME_NAME);
        assert_eq!(value["jump_type"], "double");
        assert_eq!(value["score"], 120);
        assert_eq!(value["total_jumps"], 7);
    }

    #[test]
    fn test_powerup_kind_serializes_camel_case() {
        let collector = Collector::new(None);
        assert!(!collector.enabled());

        let event = GameEvent::PowerupCollected {
            powerup_type: PowerUpKind::DoubleJump,
            score: 0,
            total_powerups_collected: 1,
        };
        let json = collector.payload(&event).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "powerup_collected");
        assert_eq!(value["powerup_type"], "doubleJump");
    }
}
