//! Keyboard state tracking and binding dispatch.
//!
//! Raw key press/release events are recorded into a held-key map plus a
//! modifier record. Once per rendered frame [`Keyboard::tick`] scans the
//! release and press binding lists against the current state and invokes
//! every binding that matches. Dispatch is level-triggered: a press binding
//! fires on every frame its key stays held (this is what makes holding W
//! drive continuously), and a release binding fires on every frame its key
//! is recorded as not held. A key that was never recorded matches nothing.

use std::collections::HashMap;
use winit::keyboard::{Key, NamedKey};

/// Snapshot of the four modifier flags, replaced wholesale on every event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            alt: state.alt_key(),
            ctrl: state.control_key(),
            meta: state.super_key(),
            shift: state.shift_key(),
        }
    }
}

/// A key identifier bound to an action invoked with the controlled context.
///
/// Bindings are append-only: there is no unbind, multiple bindings per key
/// coexist, and all of them fire in registration order.
pub struct Binding<C> {
    pub key: String,
    pub callback: Box<dyn FnMut(&mut C)>,
}

impl<C> Binding<C> {
    pub fn new(key: &str, callback: impl FnMut(&mut C) + 'static) -> Self {
        Self {
            key: key.to_lowercase(),
            callback: Box::new(callback),
        }
    }
}

/// Keyboard controller: held-key map, modifier record, and the two binding
/// lists scanned by [`Keyboard::tick`].
///
/// Constructed once by the app and threaded by reference to whatever needs
/// it; only the raw event handlers write to the key map.
pub struct Keyboard<C> {
    keys: HashMap<String, bool>,
    modifiers: Modifiers,
    bound_up: Vec<Binding<C>>,
    bound_down: Vec<Binding<C>>,
}

impl<C> Keyboard<C> {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            modifiers: Modifiers::default(),
            bound_up: Vec::new(),
            bound_down: Vec::new(),
        }
    }

    /// Record a raw key transition and replace the modifier record wholesale.
    ///
    /// Identifiers are not validated; an unknown identifier is stored and
    /// simply never matched by any binding.
    pub fn record_key_change(&mut self, identifier: &str, pressed: bool, modifiers: Modifiers) {
        self.keys.insert(identifier.to_lowercase(), pressed);
        self.modifiers = modifiers;
    }

    /// Evaluate a `+`-joined combo as a logical AND over its components.
    ///
    /// Modifier names read from the modifier record, everything else from the
    /// key map. Short-circuits false on the first unmet component; a key
    /// never recorded counts as not pressed.
    pub fn query(&self, combo: &str) -> bool {
        for code in combo.to_lowercase().split('+') {
            let pressed = match code {
                "shift" => self.modifiers.shift,
                "ctrl" => self.modifiers.ctrl,
                "alt" => self.modifiers.alt,
                "meta" => self.modifiers.meta,
                _ => self.keys.get(code).copied().unwrap_or(false),
            };
            if !pressed {
                return false;
            }
        }
        true
    }

    /// Clear the key map and the modifier record. Called when input capture
    /// is torn down. Bindings stay registered; a release recorded after this
    /// will start its release bindings firing again.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.modifiers = Modifiers::default();
    }

    /// Append bindings that fire every tick their key is held.
    pub fn bind_on_press(&mut self, bindings: Vec<Binding<C>>) {
        self.bound_down.extend(bindings);
    }

    /// Append bindings that fire every tick their key is recorded released.
    pub fn bind_on_release(&mut self, bindings: Vec<Binding<C>>) {
        self.bound_up.extend(bindings);
    }

    /// Scan both binding lists against the current key map, invoking matching
    /// callbacks in registration order. Release bindings scan first. A key
    /// absent from the map never fires (absence is not "released").
    pub fn tick(&mut self, ctx: &mut C) {
        for binding in &mut self.bound_up {
            if self.keys.get(&binding.key) == Some(&false) {
                (binding.callback)(ctx);
            }
        }
        for binding in &mut self.bound_down {
            if self.keys.get(&binding.key) == Some(&true) {
                (binding.callback)(ctx);
            }
        }
    }
}

impl<C> Default for Keyboard<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a winit logical key into a lowercase identifier, or `None` for
/// keys this scene does not track.
pub fn key_identifier(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_lowercase()),
        Key::Named(named) => match named {
            NamedKey::Shift => Some("shift".to_string()),
            NamedKey::Control => Some("ctrl".to_string()),
            NamedKey::Alt => Some("alt".to_string()),
            NamedKey::Super | NamedKey::Meta => Some("meta".to_string()),
            NamedKey::ArrowUp => Some("arrowup".to_string()),
            NamedKey::ArrowDown => Some("arrowdown".to_string()),
            NamedKey::ArrowLeft => Some("arrowleft".to_string()),
            NamedKey::ArrowRight => Some("arrowright".to_string()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed_mods(shift: bool) -> Modifiers {
        Modifiers {
            shift,
            ..Modifiers::default()
        }
    }

    #[test]
    fn query_unknown_key_is_false() {
        let keyboard: Keyboard<()> = Keyboard::new();
        assert!(!keyboard.query("w"));
        assert!(!keyboard.query("never-seen"));
    }

    #[test]
    fn query_combo_requires_every_component() {
        let mut keyboard: Keyboard<()> = Keyboard::new();
        keyboard.record_key_change("a", true, pressed_mods(true));
        assert!(keyboard.query("a+shift"));

        // Dropping the modifier alone flips the result
        keyboard.record_key_change("a", true, pressed_mods(false));
        assert!(!keyboard.query("a+shift"));

        // Dropping the key alone flips it too
        keyboard.record_key_change("a", false, pressed_mods(true));
        assert!(!keyboard.query("a+shift"));
    }

    #[test]
    fn query_is_case_insensitive() {
        let mut keyboard: Keyboard<()> = Keyboard::new();
        keyboard.record_key_change("W", true, Modifiers::default());
        assert!(keyboard.query("w"));
        assert!(keyboard.query("W"));
    }

    #[test]
    fn press_binding_fires_every_tick_while_held() {
        let mut keyboard: Keyboard<u32> = Keyboard::new();
        keyboard.bind_on_press(vec![Binding::new("w", |count: &mut u32| *count += 1)]);

        let mut count = 0;
        keyboard.record_key_change("w", true, Modifiers::default());
        keyboard.tick(&mut count);
        keyboard.tick(&mut count);
        keyboard.tick(&mut count);
        assert_eq!(count, 3);

        keyboard.record_key_change("w", false, Modifiers::default());
        keyboard.tick(&mut count);
        assert_eq!(count, 3);
    }

    #[test]
    fn release_binding_fires_every_tick_once_released() {
        let mut keyboard: Keyboard<u32> = Keyboard::new();
        keyboard.bind_on_release(vec![Binding::new("shift", |count: &mut u32| *count += 1)]);

        let mut count = 0;
        // Never recorded: absence is not "released", nothing fires
        keyboard.tick(&mut count);
        assert_eq!(count, 0);

        keyboard.record_key_change("shift", true, Modifiers::default());
        keyboard.tick(&mut count);
        assert_eq!(count, 0);

        // Level-triggered: fires on every tick after the release, not once
        keyboard.record_key_change("shift", false, Modifiers::default());
        keyboard.tick(&mut count);
        keyboard.tick(&mut count);
        assert_eq!(count, 2);
    }

    #[test]
    fn bindings_fire_in_registration_order() {
        let mut keyboard: Keyboard<Vec<&'static str>> = Keyboard::new();
        keyboard.bind_on_press(vec![
            Binding::new("w", |order: &mut Vec<&'static str>| order.push("first")),
            Binding::new("w", |order: &mut Vec<&'static str>| order.push("second")),
        ]);

        let mut order = Vec::new();
        keyboard.record_key_change("w", true, Modifiers::default());
        keyboard.tick(&mut order);
        assert_eq!(order, vec!["first", "second"]);
        keyboard.tick(&mut order);
        assert_eq!(order, vec!["first", "second", "first", "second"]);
    }

    #[test]
    fn release_scan_runs_before_press_scan() {
        let mut keyboard: Keyboard<Vec<&'static str>> = Keyboard::new();
        keyboard.bind_on_press(vec![Binding::new("w", |order: &mut Vec<&'static str>| {
            order.push("down")
        })]);
        keyboard.bind_on_release(vec![Binding::new("shift", |order: &mut Vec<&'static str>| {
            order.push("up")
        })]);

        let mut order = Vec::new();
        keyboard.record_key_change("w", true, Modifiers::default());
        keyboard.record_key_change("shift", false, Modifiers::default());
        keyboard.tick(&mut order);
        assert_eq!(order, vec!["up", "down"]);
    }

    #[test]
    fn reset_clears_previously_held_keys() {
        let mut keyboard: Keyboard<u32> = Keyboard::new();
        keyboard.bind_on_release(vec![Binding::new("w", |count: &mut u32| *count += 1)]);
        keyboard.record_key_change("w", true, pressed_mods(true));
        assert!(keyboard.query("w"));
        assert!(keyboard.query("shift"));

        keyboard.reset();
        assert!(!keyboard.query("w"));
        assert!(!keyboard.query("shift"));

        // The emptied map means release bindings stop firing until the key is
        // seen again; a release recorded afterwards re-arms them. This is the
        // documented teardown quirk, not a bug.
        let mut count = 0;
        keyboard.tick(&mut count);
        assert_eq!(count, 0);
        keyboard.record_key_change("w", false, Modifiers::default());
        keyboard.tick(&mut count);
        assert_eq!(count, 1);
    }

    #[test]
    fn key_identifier_normalizes_winit_keys() {
        assert_eq!(
            key_identifier(&Key::Character("W".into())),
            Some("w".to_string())
        );
        assert_eq!(
            key_identifier(&Key::Named(NamedKey::Shift)),
            Some("shift".to_string())
        );
        assert_eq!(
            key_identifier(&Key::Named(NamedKey::ArrowUp)),
            Some("arrowup".to_string())
        );
        assert_eq!(key_identifier(&Key::Named(NamedKey::F11)), None);
    }
}
