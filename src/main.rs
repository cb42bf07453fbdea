//! Glyphs - generative glyphs cued by the notes of a MIDI track
//!
//! Sacred-geometry glyphs pack themselves onto the canvas, pulse through a
//! palette on every note and burst into growth as each phrase closes.

mod cli;

use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glyphs::audio::{AudioSystem, AudioTrack};
use glyphs::midi::MidiDocument;
use glyphs::recording;
use glyphs::rendering::{HeadlessRenderer, RenderSystem};
use glyphs::show::Show;
use glyphs::{GlyphsError, Result};

use cli::Args;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    show: Show,
    audio: AudioSystem,
    canvas: (u32, u32),

    /// Fatal error raised inside the event loop
    error: Option<GlyphsError>,
}

impl App {
    fn new(show: Show, audio: AudioSystem, canvas: (u32, u32)) -> Self {
        Self {
            window: None,
            render_system: None,
            show,
            audio,
            canvas,
            error: None,
        }
    }

    /// Pause or resume; after the song ended, start the whole show over
    fn toggle_playback(&mut self) {
        if self.audio.is_playing() {
            self.audio.pause();
            info!("Paused at {:.2}s", self.audio.current_time());
            return;
        }

        if self.audio.has_finished() {
            self.audio.rewind();
            self.show.restart();
        }
        self.audio.play();
        info!("Playing from {:.2}s", self.audio.current_time());
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let vertices = self
            .show
            .tick(self.audio.current_time(), self.audio.is_playing());

        match render_system.render(vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.error = Some(GlyphsError::Render("GPU out of memory".into()));
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.error.is_some() {
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Glyphs")
            .with_inner_size(winit::dpi::PhysicalSize::new(self.canvas.0, self.canvas.1));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(GlyphsError::Render(format!("Failed to create window: {}", e)));
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(RenderSystem::new(Arc::clone(&window), self.canvas)) {
            Ok(render_system) => self.render_system = Some(render_system),
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        }

        println!("\nGlyphs is running!");
        println!("Click or tap to play/pause, press ESC to quit\n");

        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.toggle_playback(),
            WindowEvent::Touch(Touch {
                phase: TouchPhase::Started,
                ..
            }) => self.toggle_playback(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }
}

/// Print every track with its note count
fn list_tracks(midi: &MidiDocument) {
    println!("{} tracks:", midi.tracks.len());
    for (index, track) in midi.tracks.iter().enumerate() {
        println!(
            "  [{}] {:<24} {} notes",
            index,
            track.name.as_deref().unwrap_or("(unnamed)"),
            track.notes.len()
        );
    }
}

fn run(args: Args) -> Result<()> {
    let midi = MidiDocument::load(&args.midi)?;
    if args.list_tracks {
        list_tracks(&midi);
        return Ok(());
    }

    let notes = &midi.track(args.track)?.notes;
    let track = Arc::new(AudioTrack::load(&args.audio)?);
    let config = args.show_config();
    let canvas = (config.render.window_width, config.render.window_height);
    let mut show = Show::new(Arc::clone(&track), notes, config)?;

    if args.record {
        let recording_config = args.recording_config(track.duration());
        recording::prepare_output(&recording_config, &args.audio)?;

        let mut renderer = pollster::block_on(HeadlessRenderer::new(canvas.0, canvas.1))?;
        let stats = recording::record(&mut show, &mut renderer, &recording_config)?;

        println!(
            "\nRecorded {} frames ({} with glyphs) to {}",
            stats.frames,
            stats.active_frames,
            recording_config.frames_dir().display()
        );
        return Ok(());
    }

    let audio = AudioSystem::new(track)?;
    let mut app = App::new(show, audio, canvas);

    let event_loop =
        EventLoop::new().map_err(|e| GlyphsError::Render(format!("Event loop: {}", e)))?;
    event_loop
        .run_app(&mut app)
        .map_err(|e| GlyphsError::Render(format!("Event loop: {}", e)))?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Glyphs - generative glyphs cued by MIDI");
    println!("Initializing systems...\n");

    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
