// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): a full-screen canvas pane,
//! a one-line status footer, and modal text prompts for generate, save,
//! open and rename. Mouse input drives the editor's pointer gestures; the
//! keyboard switches tools and triggers edit commands.

use std::{
    error::Error,
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::editor::{Editor, Tool};
use crate::model::{NodeKind, Point};
use crate::render::{self, SceneView, Tint, CELL_ASPECT};
use crate::store;

const WIRE_COLOR: Color = Color::DarkGray;
const NODE_COLOR: Color = Color::White;
const INK_COLOR: Color = Color::Cyan;
const ACCENT_COLOR: Color = Color::LightGreen;
const FRAME_COLOR: Color = Color::Yellow;
const FOOTER_HINT_COLOR: Color = Color::DarkGray;
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const KEY_PAN_STEP: f64 = 4.0;
const ZOOM_IN_FACTOR: f64 = 1.2;
const ZOOM_OUT_FACTOR: f64 = 1.0 / 1.2;

const FOOTER_HINTS: &str =
    "1-6 tools · m/a/t add · g generate · w save · o open · r rename · u undo · q quit";

/// Runs the interactive terminal UI, optionally starting from a saved file.
pub fn run(initial_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let mut app = App::new();
    if let Some(path) = initial_path {
        app.open_path(&path);
    }

    let mut terminal = TerminalSession::new()?;
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Generate,
    SaveAs,
    Open,
    Rename,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            Self::Generate => "describe the diagram",
            Self::SaveAs => "save as",
            Self::Open => "open file",
            Self::Rename => "rename node",
        }
    }
}

#[derive(Debug, Clone)]
struct Prompt {
    kind: PromptKind,
    buffer: String,
}

struct App {
    editor: Editor,
    file_path: Option<PathBuf>,
    prompt: Option<Prompt>,
    canvas_area: Rect,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        Self {
            editor: Editor::new(),
            file_path: None,
            prompt: None,
            canvas_area: Rect::default(),
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.editor.escape(),

            KeyCode::Char('1') => self.editor.set_tool(Tool::Select),
            KeyCode::Char('2') => self.editor.set_tool(Tool::Connect),
            KeyCode::Char('3') => self.editor.set_tool(Tool::Pan),
            KeyCode::Char('4') => self.editor.set_tool(Tool::Delete),
            KeyCode::Char('5') => self.editor.set_tool(Tool::Pen),
            KeyCode::Char('6') => self.editor.set_tool(Tool::Eraser),
            KeyCode::Char(' ') => {
                let active = !self.editor.pan_override();
                self.editor.set_pan_override(active);
            }

            KeyCode::Char('m') => {
                let center = self.view_center_world();
                self.editor.add_node(NodeKind::Material, center);
            }
            KeyCode::Char('a') => {
                let center = self.view_center_world();
                self.editor.add_node(NodeKind::Activity, center);
            }
            KeyCode::Char('t') => {
                let center = self.view_center_world();
                self.editor.add_node(NodeKind::text_box(), center);
            }

            KeyCode::Char('u') => self.editor.undo(),
            KeyCode::Char('y') => self.editor.copy_selection(),
            KeyCode::Char('x') => self.editor.cut_selection(),
            KeyCode::Char('v') => self.editor.paste_clipboard(),
            KeyCode::Delete | KeyCode::Backspace => self.editor.delete_selection(),

            KeyCode::Char('g') => self.open_prompt(PromptKind::Generate, ""),
            KeyCode::Char('r') => self.open_prompt(PromptKind::Rename, ""),
            KeyCode::Char('w') => self.save(),
            KeyCode::Char('W') => {
                let seed = self.path_display();
                self.open_prompt(PromptKind::SaveAs, &seed);
            }
            KeyCode::Char('o') => self.open_prompt(PromptKind::Open, ""),

            KeyCode::Char('+') | KeyCode::Char('=') => {
                let center = self.view_center_screen();
                self.editor.zoom_at(center, ZOOM_IN_FACTOR);
            }
            KeyCode::Char('-') => {
                let center = self.view_center_screen();
                self.editor.zoom_at(center, ZOOM_OUT_FACTOR);
            }
            KeyCode::Left => self.editor.pan_camera(KEY_PAN_STEP, 0.0),
            KeyCode::Right => self.editor.pan_camera(-KEY_PAN_STEP, 0.0),
            KeyCode::Up => self.editor.pan_camera(0.0, KEY_PAN_STEP * CELL_ASPECT),
            KeyCode::Down => self.editor.pan_camera(0.0, -KEY_PAN_STEP * CELL_ASPECT),

            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.commit_prompt(prompt);
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.buffer.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.buffer.push(ch);
                }
            }
            _ => {}
        }
    }

    fn commit_prompt(&mut self, prompt: Prompt) {
        let input = prompt.buffer.trim().to_owned();
        if input.is_empty() {
            return;
        }
        match prompt.kind {
            PromptKind::Generate => {
                // Status and rollback handled by the editor.
                let _ = self.editor.generate_from_description(&input);
            }
            PromptKind::SaveAs => self.save_to(PathBuf::from(input)),
            PromptKind::Open => self.open_path(Path::new(&input)),
            PromptKind::Rename => self.editor.rename_selection(input),
        }
    }

    fn open_prompt(&mut self, kind: PromptKind, seed: &str) {
        self.prompt = Some(Prompt {
            kind,
            buffer: seed.to_owned(),
        });
    }

    fn save(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.save_to(path),
            None => self.open_prompt(PromptKind::SaveAs, "diagram.json"),
        }
    }

    fn save_to(&mut self, path: PathBuf) {
        match store::save_sketch(&path, self.editor.sketch()) {
            Ok(()) => {
                self.editor.set_status(format!("saved {}", path.display()));
                self.file_path = Some(path);
            }
            Err(err) => self.editor.set_status(format!("save failed: {err}")),
        }
    }

    /// A failed load leaves the current diagram untouched.
    fn open_path(&mut self, path: &Path) {
        match store::load_sketch(path) {
            Ok(sketch) => {
                self.editor.replace_sketch(sketch);
                self.editor.set_status(format!("opened {}", path.display()));
                self.file_path = Some(path.to_path_buf());
            }
            Err(err) => self.editor.set_status(format!("open failed: {err}")),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(screen) = self.screen_point(mouse.column, mouse.row) {
                    self.editor.pointer_down(screen);
                }
            }
            // Terminals keep reporting drags past the pane edge. Clamping
            // instead of dropping keeps the release deliverable, so an
            // in-flight gesture always resolves back to idle.
            MouseEventKind::Drag(MouseButton::Left) => {
                self.editor
                    .pointer_move(self.clamped_screen_point(mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.editor
                    .pointer_up(self.clamped_screen_point(mouse.column, mouse.row));
            }
            MouseEventKind::ScrollUp => {
                if let Some(screen) = self.screen_point(mouse.column, mouse.row) {
                    self.editor.zoom_at(screen, ZOOM_IN_FACTOR);
                }
            }
            MouseEventKind::ScrollDown => {
                if let Some(screen) = self.screen_point(mouse.column, mouse.row) {
                    self.editor.zoom_at(screen, ZOOM_OUT_FACTOR);
                }
            }
            _ => {}
        }
    }

    /// Maps a terminal cell onto editor screen space. Cells are twice as
    /// tall as wide, so rows count double.
    fn screen_point(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.canvas_area;
        if column < area.x
            || row < area.y
            || column >= area.x.saturating_add(area.width)
            || row >= area.y.saturating_add(area.height)
        {
            return None;
        }
        Some(Point::new(
            f64::from(column - area.x),
            f64::from(row - area.y) * CELL_ASPECT,
        ))
    }

    /// Like `screen_point`, but pulls out-of-pane cells onto the nearest
    /// pane edge instead of rejecting them.
    fn clamped_screen_point(&self, column: u16, row: u16) -> Point {
        let area = self.canvas_area;
        let col = column
            .max(area.x)
            .min(area.x.saturating_add(area.width.saturating_sub(1)));
        let row = row
            .max(area.y)
            .min(area.y.saturating_add(area.height.saturating_sub(1)));
        Point::new(
            f64::from(col - area.x),
            f64::from(row - area.y) * CELL_ASPECT,
        )
    }

    fn view_center_screen(&self) -> Point {
        Point::new(
            f64::from(self.canvas_area.width) / 2.0,
            f64::from(self.canvas_area.height) / 2.0 * CELL_ASPECT,
        )
    }

    fn view_center_world(&self) -> Point {
        self.editor.camera().to_world(self.view_center_screen())
    }

    fn path_display(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    fn title(&self) -> String {
        let name = self
            .file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unsaved".to_owned());
        let mut tool = self.editor.tool().display_name().to_owned();
        if self.editor.pan_override() {
            tool.push_str("+pan");
        }
        format!(" galatea · {name} [{tool}] ")
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let canvas_pane = layout[0];
    let status_area = layout[1];

    let block = Block::default().borders(Borders::ALL).title(app.title());
    let inner = block.inner(canvas_pane);
    app.canvas_area = inner;
    frame.render_widget(block, canvas_pane);

    let view = SceneView {
        sketch: app.editor.sketch(),
        selection: app.editor.selection(),
        camera: app.editor.camera(),
        pending_source: app.editor.pending_source(),
        box_selection: app.editor.box_selection_rect(),
        selection_frame: if app.editor.selection().nodes().len() > 1 {
            app.editor.selection_bounds()
        } else {
            None
        },
        active_stroke: app.editor.active_stroke(),
    };
    let canvas = render::render_scene(&view, inner.width as usize, inner.height as usize);
    frame.render_widget(Paragraph::new(canvas_lines(&canvas)), inner);

    let status = app.editor.status_line(Instant::now());
    let footer = Line::from(vec![
        Span::raw(status),
        Span::styled(
            format!("  │  {FOOTER_HINTS}"),
            Style::default().fg(FOOTER_HINT_COLOR),
        ),
    ]);
    frame.render_widget(Paragraph::new(footer), status_area);

    if let Some(prompt) = &app.prompt {
        draw_prompt(frame, area, prompt);
    }

    // The frame was just painted; drop any queued redraw request.
    let _ = app.editor.take_redraw();
}

fn draw_prompt(frame: &mut Frame<'_>, area: Rect, prompt: &Prompt) {
    let width = area.width.saturating_sub(4).min(64).max(20);
    let overlay = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height / 2,
        width,
        height: 3,
    };
    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", prompt.kind.title()));
    let text = format!("{}▌", prompt.buffer);
    frame.render_widget(Paragraph::new(text).block(block), overlay);
}

fn canvas_lines(canvas: &render::Canvas) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(canvas.height());
    for y in 0..canvas.height() {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_tint = Tint::Plain;
        for x in 0..canvas.width() {
            let (ch, tint) = canvas.cell(x, y).unwrap_or((' ', Tint::Plain));
            if tint != run_tint && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), tint_style(run_tint)));
            }
            run_tint = tint;
            run.push(ch);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, tint_style(run_tint)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn tint_style(tint: Tint) -> Style {
    let style = Style::default();
    match tint {
        Tint::Plain => style,
        Tint::Wire => style.fg(WIRE_COLOR),
        Tint::Node => style.fg(NODE_COLOR),
        Tint::Ink => style.fg(INK_COLOR),
        Tint::Accent => style.fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        Tint::Frame => style.fg(FRAME_COLOR),
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
