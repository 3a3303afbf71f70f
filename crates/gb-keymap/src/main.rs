//! Key mapping settings window.
//!
//! Renders the binding table in a winit window, rebinds buttons through
//! a modal capture overlay (click a row, press a key, confirm), and
//! persists every confirmed edit. Outside a capture, keypresses drive
//! the joypad through the current mapping so bindings can be tried out
//! on the spot.

use std::path::PathBuf;
use std::process;

use gb_joypad::{GbButton, Joypad};
use gb_keymap::font::{self, CELL};
use gb_keymap::{KEYMAP_FILE, KeymapEditor, KeymapRow, KeymapStore, normalize};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

/// Screen size in character cells.
const COLS: usize = 28;
const ROWS: usize = 17;

const FB_WIDTH: u32 = (COLS * CELL) as u32;
const FB_HEIGHT: u32 = (ROWS * CELL) as u32;

/// Window scale factor.
const SCALE: u32 = 3;

/// Table layout (cell coordinates).
const NAME_COL: usize = 1;
const LABEL_COL: usize = 11;
const TABLE_FIRST_ROW: usize = 3;

/// Pad-test strip.
const PAD_ROW: usize = 13;

/// Capture overlay.
const DIALOG_COL: usize = 2;
const DIALOG_ROW: usize = 4;
const DIALOG_COLS: usize = 24;
const DIALOG_ROWS: usize = 8;
const DIALOG_TITLE_ROW: usize = DIALOG_ROW + 1;
const DIALOG_PROMPT_ROW: usize = DIALOG_ROW + 3;
const DIALOG_PREVIEW_ROW: usize = DIALOG_ROW + 4;
const DIALOG_BUTTONS_ROW: usize = DIALOG_ROW + 6;
const CONFIRM_TEXT: &str = "[CONFIRM]";
const CONFIRM_COL: usize = DIALOG_COL + 2;
const CLOSE_TEXT: &str = "[CLOSE]";
const CLOSE_COL: usize = CONFIRM_COL + CONFIRM_TEXT.len() + 2;

/// DMG palette, darkest to lightest.
const BG: [u8; 4] = [0x0F, 0x38, 0x0F, 0xFF];
const DIM: [u8; 4] = [0x30, 0x62, 0x30, 0xFF];
const MID: [u8; 4] = [0x8B, 0xAC, 0x0F, 0xFF];
const FG: [u8; 4] = [0x9B, 0xBC, 0x0F, 0xFF];

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    config_path: PathBuf,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: PathBuf::from(KEYMAP_FILE),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if let Some(path) = args.get(i) {
                    cli.config_path = PathBuf::from(path);
                }
            }
            "--help" | "-h" => {
                eprintln!("Usage: gb-keymap [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --config <file>  Key mapping file [default: {KEYMAP_FILE}]");
                eprintln!("  -h, --help       Show this help");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

// ---------------------------------------------------------------------------
// Settings window
// ---------------------------------------------------------------------------

struct App {
    editor: KeymapEditor,
    store: KeymapStore,
    pad: Joypad,
    window: Option<&'static Window>,
    pixels: Option<Pixels<'static>>,
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    fn new(editor: KeymapEditor, store: KeymapStore) -> Self {
        Self {
            editor,
            store,
            pad: Joypad::new(),
            window: None,
            pixels: None,
            cursor: None,
        }
    }

    fn handle_key(&mut self, keycode: KeyCode, pressed: bool) {
        if self.editor.capturing() {
            // Every press while the overlay is open updates the preview,
            // Escape included — only the CLOSE control dismisses it.
            if pressed {
                self.editor.capture(&code_name(keycode));
            }
            return;
        }

        let label = normalize::key_label(&code_name(keycode));
        if let Some(button) = self.editor.mapping().button_for_label(&label) {
            if pressed {
                self.pad.press(button);
            } else {
                self.pad.release(button);
            }
        }
    }

    fn handle_click(&mut self) {
        let Some(cell) = self.cursor_cell() else {
            return;
        };

        if self.editor.capturing() {
            self.handle_dialog_click(cell);
            return;
        }

        // Any click on a table row selects it; the row's identity comes
        // from its position, not from a per-row control.
        let (_, row) = cell;
        if (TABLE_FIRST_ROW..TABLE_FIRST_ROW + GbButton::ALL.len()).contains(&row) {
            self.editor.select(GbButton::ALL[row - TABLE_FIRST_ROW]);
        }
    }

    fn handle_dialog_click(&mut self, (col, row): (usize, usize)) {
        if row != DIALOG_BUTTONS_ROW {
            return;
        }

        if (CONFIRM_COL..CONFIRM_COL + CONFIRM_TEXT.len()).contains(&col) {
            if self.editor.confirm() {
                if let Err(e) = self.store.save(self.editor.mapping()) {
                    eprintln!("Failed to save key mapping: {e}");
                    process::exit(1);
                }
            }
        } else if (CLOSE_COL..CLOSE_COL + CLOSE_TEXT.len()).contains(&col) {
            self.editor.cancel();
        }
    }

    /// Cell under the mouse cursor, if it is over the framebuffer.
    fn cursor_cell(&self) -> Option<(usize, usize)> {
        let cursor = self.cursor?;
        let pixels = self.pixels.as_ref()?;
        let (x, y) = pixels
            .window_pos_to_pixel((cursor.x as f32, cursor.y as f32))
            .ok()?;
        Some((x / CELL, y / CELL))
    }

    fn draw(&mut self) {
        let rows = self.editor.rows();
        let selected = self.editor.selected();
        let preview = self.editor.preview().to_string();
        let pad = self.pad;

        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };
        let frame = pixels.frame_mut();
        let w = FB_WIDTH as usize;

        for px in frame.chunks_exact_mut(4) {
            px.copy_from_slice(&BG);
        }

        font::draw_text(frame, w, NAME_COL, 0, "KEY CONFIG", MID, BG);
        font::draw_text(frame, w, NAME_COL, 2, "BUTTON", MID, BG);
        font::draw_text(frame, w, LABEL_COL, 2, "KEY", MID, BG);
        draw_table(frame, w, &rows, selected);
        draw_pad_strip(frame, w, &pad);
        font::draw_text(frame, w, NAME_COL, ROWS - 2, "CLICK A ROW TO REBIND", DIM, BG);

        // A selection means the capture overlay is open
        if let Some(button) = selected {
            draw_dialog(frame, w, button, &preview);
        }
    }
}

fn draw_table(frame: &mut [u8], w: usize, rows: &[KeymapRow], selected: Option<GbButton>) {
    for (i, row) in rows.iter().enumerate() {
        let y = TABLE_FIRST_ROW + i;
        let (fg, bg) = if selected == Some(row.button) {
            font::fill_cells(frame, w, 0, y, COLS, 1, FG);
            (BG, FG)
        } else {
            (FG, BG)
        };
        font::draw_text(frame, w, NAME_COL, y, row.button.name(), fg, bg);
        font::draw_text(frame, w, LABEL_COL, y, &row.label, fg, bg);
    }
}

fn draw_pad_strip(frame: &mut [u8], w: usize, pad: &Joypad) {
    font::draw_text(frame, w, NAME_COL, PAD_ROW - 1, "PAD TEST", MID, BG);

    let tags: [(&str, GbButton); 8] = [
        ("U", GbButton::Up),
        ("D", GbButton::Down),
        ("L", GbButton::Left),
        ("R", GbButton::Right),
        ("A", GbButton::A),
        ("B", GbButton::B),
        ("SL", GbButton::Select),
        ("ST", GbButton::Start),
    ];

    let mut col = NAME_COL;
    for (tag, button) in tags {
        let (fg, bg) = if pad.pressed(button) { (BG, FG) } else { (DIM, BG) };
        font::draw_text(frame, w, col, PAD_ROW, tag, fg, bg);
        col += tag.len() + 1;
    }
}

fn draw_dialog(frame: &mut [u8], w: usize, button: GbButton, preview: &str) {
    font::fill_cells(frame, w, DIALOG_COL, DIALOG_ROW, DIALOG_COLS, DIALOG_ROWS, DIM);

    let title = format!("REBIND {button}");
    font::draw_text(frame, w, CONFIRM_COL, DIALOG_TITLE_ROW, &title, FG, DIM);
    font::draw_text(frame, w, CONFIRM_COL, DIALOG_PROMPT_ROW, "PRESS A KEY", MID, DIM);
    let line = format!("> {preview}");
    font::draw_text(frame, w, CONFIRM_COL, DIALOG_PREVIEW_ROW, &line, FG, DIM);
    font::draw_text(frame, w, CONFIRM_COL, DIALOG_BUTTONS_ROW, CONFIRM_TEXT, FG, DIM);
    font::draw_text(frame, w, CLOSE_COL, DIALOG_BUTTONS_ROW, CLOSE_TEXT, FG, DIM);
}

/// Physical key-code name for a winit key code.
///
/// The debug names of winit key codes are the DOM `code` values
/// ("KeyE", "Digit1", "ArrowUp") the normalization chain expects.
fn code_name(keycode: KeyCode) -> String {
    format!("{keycode:?}")
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_size = winit::dpi::LogicalSize::new(FB_WIDTH * SCALE, FB_HEIGHT * SCALE);
        let attrs = WindowAttributes::default()
            .with_title("Key Config")
            .with_inner_size(window_size)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window: &'static Window = Box::leak(Box::new(window));
                let inner = window.inner_size();
                let surface = SurfaceTexture::new(inner.width, inner.height, window);
                match Pixels::new(FB_WIDTH, FB_HEIGHT, surface) {
                    Ok(pixels) => {
                        self.pixels = Some(pixels);
                    }
                    Err(e) => {
                        eprintln!("Failed to create pixels: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                self.window = Some(window);
            }
            Err(e) => {
                eprintln!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_click();
                if let Some(window) = self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if keycode == KeyCode::Escape && pressed && !self.editor.capturing() {
                        event_loop.exit();
                        return;
                    }
                    self.handle_key(keycode, pressed);
                    if let Some(window) = self.window {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.draw();
                if let Some(pixels) = self.pixels.as_ref() {
                    if let Err(e) = pixels.render() {
                        eprintln!("Render error: {e}");
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = parse_args();

    let store = KeymapStore::new(cli.config_path);
    let mapping = match store.load() {
        Ok(mapping) => mapping,
        Err(e) => {
            eprintln!("Failed to load key mapping: {e}");
            process::exit(1);
        }
    };
    eprintln!("Key mapping: {mapping}");

    let mut app = App::new(KeymapEditor::new(mapping), store);

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            eprintln!("Failed to create event loop: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        eprintln!("Event loop error: {e}");
        process::exit(1);
    }
}
