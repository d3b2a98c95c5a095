//! Debug overlay UI.
//!
//! A small egui window showing the driving state; toggled with backquote.

use crate::camera::RigMode;
use crate::player::Player;

/// State for the debug overlay
pub struct DebugOverlay {
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new()
    }
}

pub fn draw_overlay(ctx: &egui::Context, overlay: &DebugOverlay, player: &Player, delta: f32) {
    if !overlay.visible {
        return;
    }

    egui::Window::new("Driving Debug")
        .resizable(false)
        .show(ctx, |ui| {
            let pos = player.container.position;
            ui.label(format!("player: {}", player.name));
            ui.label(format!("position: ({:.1}, {:.1}, {:.1})", pos.x, pos.y, pos.z));
            ui.label(format!("speed multiplier: {:.1}", player.speed));
            ui.label(format!(
                "heading: {:.2} rad / camera: {:.2} rad",
                player.heading_angle(),
                player.camera_angle()
            ));
            let rig = match player.rig.mode {
                RigMode::Chase => "chase",
                RigMode::Orbit => "orbit",
            };
            ui.label(format!("camera rig: {}", rig));
            if delta > 0.0 {
                ui.label(format!("frame: {:.1} ms", delta * 1000.0));
            }
        });
}
