//! Game assembly: player construction and control wiring.
//!
//! The binding tables are the configuration surface for the scene: WASD on
//! fixed steps, arrows on time-scaled steps, shift for boost.

use crate::keyboard::{Binding, Keyboard};
use crate::player::Player;

/// Build the driven player for a viewport with the given aspect ratio.
pub fn init_player(aspect: f32) -> Player {
    let mut player = Player::new("Guest", aspect);
    // The vehicle is procedural, so it is attached immediately; a streamed
    // asset would flip this flag from its load callback instead
    player.finish_loading();
    player
}

/// Wire the default control scheme into the keyboard controller.
///
/// Press bindings fire on every frame their key is held, which is what makes
/// holding a key drive continuously. Shift's release binding restores the
/// baseline speed; both speed callbacks are idempotent so level-triggered
/// re-fires are harmless.
pub fn bind_controls(keyboard: &mut Keyboard<Player>) {
    keyboard.bind_on_press(vec![
        Binding::new("w", |player: &mut Player| player.drive(1.0)),
        Binding::new("s", |player: &mut Player| player.drive(-1.0)),
        Binding::new("a", |player: &mut Player| player.steer(1.0)),
        Binding::new("d", |player: &mut Player| player.steer(-1.0)),
        Binding::new("arrowup", |player: &mut Player| player.drive_scaled(1.0)),
        Binding::new("arrowdown", |player: &mut Player| player.drive_scaled(-1.0)),
        Binding::new("arrowleft", |player: &mut Player| player.steer_scaled(1.0)),
        Binding::new("arrowright", |player: &mut Player| player.steer_scaled(-1.0)),
        Binding::new("shift", |player: &mut Player| player.set_boost()),
        Binding::new("z", |player: &mut Player| {
            log::debug!(
                "{} at {:?} heading {:.3} rad",
                player.name,
                player.container.position,
                player.heading_angle()
            );
        }),
    ]);
    keyboard.bind_on_release(vec![Binding::new("shift", |player: &mut Player| {
        player.clear_boost()
    })]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MOVE_STEP, SPEED_BOOST, SPEED_NORMAL};
    use crate::keyboard::Modifiers;
    use glam::Vec3;

    fn shift_mods() -> Modifiers {
        Modifiers {
            shift: true,
            ..Modifiers::default()
        }
    }

    /// Full path: key events -> dispatch tick -> motion resolver.
    #[test]
    fn held_w_drives_forward_every_tick() {
        let mut keyboard = Keyboard::new();
        bind_controls(&mut keyboard);
        let mut player = init_player(1.0);
        // Chase camera starts behind the vehicle at +Z, so its horizontal
        // forward is -Z and "forward" input drives the container toward -Z
        keyboard.record_key_change("w", true, Modifiers::default());
        keyboard.tick(&mut player);
        keyboard.tick(&mut player);
        let expected = Vec3::new(0.0, 0.0, -2.0 * MOVE_STEP);
        assert!((player.container.position - expected).length() < 1e-4);
    }

    #[test]
    fn shift_boosts_until_released() {
        let mut keyboard = Keyboard::new();
        bind_controls(&mut keyboard);
        let mut player = init_player(1.0);

        keyboard.record_key_change("shift", true, shift_mods());
        keyboard.tick(&mut player);
        keyboard.tick(&mut player);
        assert_eq!(player.speed, SPEED_BOOST);

        keyboard.record_key_change("shift", false, Modifiers::default());
        keyboard.tick(&mut player);
        keyboard.tick(&mut player);
        assert_eq!(player.speed, SPEED_NORMAL);
    }

    #[test]
    fn camera_reaims_at_eye_height_after_driving() {
        let mut keyboard = Keyboard::new();
        bind_controls(&mut keyboard);
        let mut player = init_player(1.0);
        keyboard.record_key_change("w", true, Modifiers::default());
        keyboard.tick(&mut player);
        let expected = player.container.position + crate::constants::CAMERA_ORIGIN_OFFSET;
        assert!((player.rig.camera.target() - expected).length() < 1e-4);
    }
}
