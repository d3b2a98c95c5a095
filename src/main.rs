#![allow(dead_code)]

mod app;
mod camera;
mod clock;
mod constants;
mod game;
mod keyboard;
mod player;
mod pointer;
mod renderer;
mod scene;
mod transform;
mod ui;

use std::sync::Arc;
use std::time::Instant;

use glutin::prelude::*;
use glutin::surface::WindowSurface;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

use clock::FrameClock;
use keyboard::{Keyboard, Modifiers};
use player::Player;
use pointer::PointerState;
use renderer::Renderer;
use scene::Scene;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    state: Option<AppState>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,

    // Rendering
    renderer: Renderer,
    scene: Scene,

    // Driven state
    player: Player,

    // Input state
    keyboard: Keyboard<Player>,
    pointer: PointerState,
    modifiers: Modifiers,

    // UI state
    overlay: ui::DebugOverlay,

    // Timing
    clock: FrameClock,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        // Create window and GL context
        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = app::create_window(event_loop);

        // Initialize the scene and the driven player
        let size = window.inner_size();
        let aspect = size.width as f32 / size.height.max(1) as f32;
        let scene = Scene::new();
        let renderer = Renderer::new(gl.clone(), &scene).expect("Failed to create renderer");
        let player = game::init_player(aspect);

        // Wire the control scheme
        let mut keyboard = Keyboard::new();
        game::bind_controls(&mut keyboard);

        self.state = Some(AppState {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
            renderer,
            scene,
            player,
            keyboard,
            pointer: PointerState::new(),
            modifiers: Modifiers::default(),
            overlay: ui::DebugOverlay::new(),
            clock: FrameClock::new(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // Let egui handle the event first
        let egui_consumed = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                // Input capture teardown before the loop exits
                state.keyboard.reset();
                state.pointer.reset();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.renderer.resize(size.width as i32, size.height as i32);
                state
                    .player
                    .rig
                    .camera
                    .resize(size.width as f32, size.height as f32);
            }
            WindowEvent::ModifiersChanged(mods) => {
                state.modifiers = mods.state().into();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !egui_consumed.consumed {
                    let pressed = event.state == ElementState::Pressed;

                    // App-level keys act on the press edge only
                    if pressed && !event.repeat {
                        if let PhysicalKey::Code(code) = event.physical_key {
                            match code {
                                KeyCode::Escape => {
                                    state.keyboard.reset();
                                    state.pointer.reset();
                                    event_loop.exit();
                                }
                                KeyCode::Backquote => state.overlay.toggle(),
                                KeyCode::KeyC => state.player.rig.toggle_mode(),
                                _ => {}
                            }
                        }
                    }

                    // Everything else feeds the binding dispatch
                    if let Some(identifier) = keyboard::key_identifier(&event.logical_key) {
                        state
                            .keyboard
                            .record_key_change(&identifier, pressed, state.modifiers);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.pointer.position = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                if !egui_consumed.consumed && button == MouseButton::Left {
                    state.pointer.down = btn_state == ElementState::Pressed;
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !egui_consumed.consumed {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.05,
                    };
                    state.player.rig.dolly(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn update_and_render(&mut self) {
        let delta = self.clock.delta(Instant::now());

        // Pointer drag feeds the orbit rig; the chase rig ignores it
        if let Some((dx, dy)) = self.pointer.drag_delta() {
            self.player.rig.orbit(dx, dy);
        }

        // Every key event delivered since the previous frame is already in
        // the key map; scan the binding tables once
        self.player.frame_delta = delta;
        self.keyboard.tick(&mut self.player);

        // Keep the rig glued to the container even when nothing moved
        self.player.update_camera();

        // Run the overlay UI
        let overlay = &self.overlay;
        let player = &self.player;
        self.egui_glow
            .run(&self.window, |ctx| ui::draw_overlay(ctx, overlay, player, delta));

        // Render
        unsafe {
            use glow::HasContext;
            self.gl.clear_color(0.53, 0.77, 0.92, 1.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.renderer
            .render(&self.player.rig.camera, &self.scene, &self.player.container)
            .unwrap();

        // Render egui
        self.egui_glow.paint(&self.window);

        // Swap buffers
        self.gl_surface.swap_buffers(&self.gl_context).unwrap();
    }
}
