use anyhow::Result;
use log::{info, warn};
use rusted_controls::engine::clock::FrameClock;
use rusted_controls::engine::input::config::CONTROLS_FILE;
use rusted_controls::engine::input::gamepad::GamepadInput;
use rusted_controls::engine::input::{
    scan, Action, ControlsEditor, Direction, HostInput, InputCode, InputManager, RawInputSource,
    RebindOutcome,
};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

const VK_F2: u8 = 0x71;
const VK_F3: u8 = 0x72;
const VK_F4: u8 = 0x73;
const VK_F5: u8 = 0x74;

/// Controls screen driven from the keyboard's function keys
///
/// F2 picks the next action and waits for a replacement of its first key,
/// F3 waits for an extra key, F4 restores defaults, F5 commits and saves.
struct ControlsDemo {
    editor: Option<ControlsEditor>,
    selected: usize,
    direction: Direction,
}

impl ControlsDemo {
    fn new() -> Self {
        Self {
            editor: None,
            selected: Action::ALL.len() - 1,
            direction: Direction::None,
        }
    }

    fn tick(&mut self, input: &mut InputManager, gamepad_available: bool) {
        if let Some(editor) = self.editor.as_mut() {
            if editor.is_reading_input() {
                if let Some(code) = scan(input.frame()) {
                    let previous_owner = editor.bindings().owner_of(code);
                    match editor.apply_input(code) {
                        Ok(RebindOutcome::Bound { action, .. }) => {
                            if let Some(owner) = previous_owner.filter(|&owner| owner != action) {
                                info!("{} taken from '{}'", code, owner);
                            }
                            info!("'{}' is now {}", action, editor.bindings().get(action).keys_text())
                        }
                        Ok(_) => info!("Unchanged"),
                        Err(e) => warn!("{}", e),
                    }
                }
                return;
            }
        }

        if function_key(input, VK_F2) {
            self.selected = (self.selected + 1) % Action::ALL.len();
            let action = Action::ALL[self.selected];
            let editor = self.editor.get_or_insert_with(|| input.begin_edit());
            if !editor.begin_edit(action) {
                if let Err(e) = editor.begin_replace(action, 0) {
                    warn!("{}", e);
                }
            }
            info!("{}: {}", action, action.description());
            info!("Press a new input for '{}'", action);
            return;
        }
        if function_key(input, VK_F3) {
            let action = Action::ALL[self.selected];
            let editor = self.editor.get_or_insert_with(|| input.begin_edit());
            match editor.begin_add(action) {
                Ok(()) => info!("Press an extra input for '{}'", action),
                Err(e) => warn!("{}", e),
            }
            return;
        }
        if function_key(input, VK_F4) {
            let editor = self.editor.get_or_insert_with(|| input.begin_edit());
            editor.restore_defaults(gamepad_available);
            info!("Default controls restored (press F5 to keep them)");
            return;
        }
        if function_key(input, VK_F5) {
            self.commit(input);
            return;
        }

        for action in Action::ALL {
            if input.repeating(action) {
                info!("{} ({})", action, input.codes_for_action(action).join(", "));
            }
        }
        let direction = input.directional8();
        if direction != self.direction {
            self.direction = direction;
            let (x, y) = direction.vector();
            info!("Direction {:?} (numpad {}, x {}, y {})", direction, direction.numpad(), x, y);
        }
    }

    fn commit(&mut self, input: &mut InputManager) {
        let Some(editor) = self.editor.as_ref() else {
            info!("No changes to save");
            return;
        };
        if !editor.is_changed() {
            self.editor = None;
            info!("No changes to save");
            return;
        }
        match input.commit(editor) {
            Ok(()) => {
                self.editor = None;
                if let Err(e) = input.save() {
                    warn!("{:#}", e);
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
}

fn function_key(input: &InputManager, vk: u8) -> bool {
    input
        .frame()
        .state(InputCode::Keyboard(vk).code())
        .is_some_and(|state| state.just_pressed)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Controls...");

    let mut host = HostInput::new(GamepadInput::new());
    let gamepad_available = host.has_gamepad();
    let mut input = InputManager::load(CONTROLS_FILE, gamepad_available)?;
    let mut clock = FrameClock::new();
    let mut demo = ControlsDemo::new();

    for action in Action::ALL {
        info!("{:>12}: {}", action.name(), input.codes_for_action(action).join(", "));
    }
    info!("F2 edit next action, F3 add a key, F4 restore defaults, F5 save");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Controls")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                host.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                host.release_keys();
                input.reset();
            }
            Event::AboutToWait => {
                host.pump();
                for _ in 0..clock.begin_frame() {
                    input.update(&host, clock.now());
                    demo.tick(&mut input, gamepad_available);
                }
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
