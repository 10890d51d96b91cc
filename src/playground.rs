//! Terminal stand-in for a toolkit: frameless windows drawn with ratatui,
//! hit-tested per cell, and driven through the same tap a real style layer
//! would use. One terminal cell is one pixel as far as the manager is
//! concerned.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::config::{ConfigError, WmConfig};
use crate::constants::OPT_IN_PROPERTY;
use crate::event::{Hit, PointerEvent, TapEvent, WidgetKind};
use crate::style::StyleAdapter;
use crate::window::{
    DragPhase, FloatRect, HalfSide, MaximizeMode, Point, Size, ToplevelWindow, WindowError,
    WindowHandle, WindowId, WindowManager,
};

const BUTTON_WIDTH: i32 = 5;
const LABEL_ROW: i32 = 3;

pub const PLAYGROUND_MIN_SIZE: Size = Size::new(16, 6);

#[derive(Debug)]
pub struct TermWindow {
    id: WindowId,
    title: String,
    rect: FloatRect,
    restore: Option<FloatRect>,
    screen: Rect,
    opt_in: Option<bool>,
    clicks: usize,
}

impl TermWindow {
    pub fn new(id: WindowId, title: impl Into<String>, rect: FloatRect, screen: Rect) -> Self {
        Self {
            id,
            title: title.into(),
            rect,
            restore: None,
            screen,
            opt_in: None,
            clicks: 0,
        }
    }

    pub fn with_opt_in(mut self, opt_in: Option<bool>) -> Self {
        self.opt_in = opt_in;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clicks(&self) -> usize {
        self.clicks
    }

    pub fn is_maximized(&self) -> bool {
        self.restore.is_some()
    }

    fn button_rect(&self) -> FloatRect {
        FloatRect::new(
            self.rect.right() - 1 - BUTTON_WIDTH,
            self.rect.y + 1,
            BUTTON_WIDTH as u16,
            1,
        )
    }

    /// Which part of this window sits under `point`, if any.
    pub fn widget_at(&self, point: Point) -> Option<WidgetKind> {
        if !self.rect.contains(point) {
            return None;
        }
        let row = point.y - self.rect.y;
        let col = point.x - self.rect.x;
        let inner = col > 0 && col < self.rect.width as i32 - 1;
        Some(match row {
            1 if self.button_rect().contains(point) => WidgetKind::Button,
            1 if inner => WidgetKind::TitleBar,
            LABEL_ROW if inner => WidgetKind::Label,
            _ => WidgetKind::Surface,
        })
    }

}

impl ToplevelWindow for TermWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn geometry(&self) -> FloatRect {
        self.rect
    }

    fn min_size(&self) -> Size {
        PLAYGROUND_MIN_SIZE
    }

    fn bool_property(&self, name: &str) -> Option<bool> {
        if name == OPT_IN_PROPERTY {
            self.opt_in
        } else {
            None
        }
    }

    fn move_to(&mut self, origin: Point) -> Result<(), WindowError> {
        self.restore = None;
        self.rect = self.rect.with_origin(origin);
        Ok(())
    }

    fn resize_to(&mut self, geometry: FloatRect) -> Result<(), WindowError> {
        self.restore = None;
        self.rect = geometry;
        Ok(())
    }

    fn maximize(&mut self, mode: MaximizeMode) -> Result<(), WindowError> {
        let screen = screen_bounds(self.screen);
        let target = match mode {
            MaximizeMode::ToggleMaximize => {
                if let Some(restore) = self.restore.take() {
                    self.rect = restore;
                    return Ok(());
                }
                screen
            }
            MaximizeMode::Maximize => screen,
            MaximizeMode::HalfMaximize(side) => {
                let half = screen.width / 2;
                let (x, width) = match side {
                    HalfSide::Left => (screen.x, half),
                    HalfSide::Right => (screen.x + half as i32, screen.width - half),
                };
                FloatRect::new(x, screen.y, width, screen.height)
            }
        };
        if screen.width == 0 || screen.height == 0 {
            return Ok(());
        }
        self.restore.get_or_insert(self.rect);
        self.rect = target;
        Ok(())
    }
}

pub struct Playground {
    windows: Vec<Rc<RefCell<TermWindow>>>,
    style: StyleAdapter,
    screen: Rect,
    next_id: u64,
    status: String,
}

impl Playground {
    pub fn new(config: WmConfig, screen: Rect) -> Result<Self, ConfigError> {
        let window_manager = WindowManager::with_config(config, screen_bounds(screen))?;
        Ok(Self {
            windows: Vec::new(),
            style: StyleAdapter::new(window_manager),
            screen,
            next_id: 1,
            status: String::new(),
        })
    }

    pub fn window_manager(&self) -> &WindowManager {
        self.style.window_manager()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
        self.style
            .window_manager_mut()
            .set_screen_bounds(screen_bounds(screen));
        for window in &self.windows {
            window.borrow_mut().screen = screen;
        }
    }

    pub fn window(&self, id: WindowId) -> Option<Rc<RefCell<TermWindow>>> {
        self.windows
            .iter()
            .find(|window| window.borrow().id == id)
            .cloned()
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|window| window.borrow().id).collect()
    }

    /// Create a window on top of the stack and polish it.
    pub fn spawn(&mut self, title: &str, rect: FloatRect, opt_in: Option<bool>) -> WindowId {
        let id = WindowId::new(self.next_id);
        self.next_id += 1;
        let window = Rc::new(RefCell::new(
            TermWindow::new(id, title, rect, self.screen).with_opt_in(opt_in),
        ));
        let handle: WindowHandle = window.clone();
        self.style.polish(&handle);
        self.windows.push(window);
        id
    }

    /// Unpolish and destroy a window.
    pub fn close(&mut self, id: WindowId) {
        let Some(idx) = self.windows.iter().position(|w| w.borrow().id == id) else {
            return;
        };
        let window = self.windows.remove(idx);
        let handle: WindowHandle = window;
        self.style.unpolish(&handle);
        drop(handle);
        self.style.filter_event(&TapEvent::Destroyed(id));
    }

    pub fn close_topmost(&mut self) {
        if let Some(id) = self.windows.last().map(|window| window.borrow().id) {
            self.close(id);
        }
    }

    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        self.windows.iter().rev().find_map(|window| {
            let window = window.borrow();
            window.widget_at(point).map(|widget| Hit {
                window: window.id,
                widget,
            })
        })
    }

    fn raise(&mut self, id: WindowId) {
        if let Some(idx) = self.windows.iter().position(|w| w.borrow().id == id) {
            let window = self.windows.remove(idx);
            self.windows.push(window);
        }
    }

    /// Route one terminal mouse event: first through the tap, then, if it was
    /// not consumed, to the widget under the pointer.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let position = Point::new(mouse.column as i32, mouse.row as i32);
        let target = self.hit_test(position);
        if let (MouseEventKind::Down(_), Some(hit)) = (mouse.kind, target) {
            self.raise(hit.window);
        }
        let pointer = PointerEvent {
            kind: mouse.kind,
            position,
            modifiers: mouse.modifiers,
            target,
            timestamp: Instant::now(),
        };
        let consumed = self.style.filter_event(&TapEvent::Pointer(pointer));
        if consumed {
            self.status = match self.window_manager().phase() {
                DragPhase::Dragging => "moving".to_string(),
                DragPhase::Resizing => "resizing".to_string(),
                _ => String::new(),
            };
            return true;
        }
        self.deliver(pointer);
        false
    }

    fn deliver(&mut self, pointer: PointerEvent) {
        let Some(hit) = pointer.target else {
            return;
        };
        if pointer.kind != MouseEventKind::Up(MouseButton::Left) {
            return;
        }
        match hit.widget {
            WidgetKind::Button => {
                if let Some(window) = self.window(hit.window) {
                    let mut window = window.borrow_mut();
                    window.clicks += 1;
                    self.status = format!("{}: button clicked {} times", window.title, window.clicks);
                }
            }
            WidgetKind::Label => {
                self.status = "label clicked".to_string();
            }
            _ => {}
        }
    }

    pub fn focus_lost(&mut self) {
        for id in self.window_ids() {
            self.style.filter_event(&TapEvent::FocusLost(id));
        }
    }

    pub fn tick(&mut self) {
        self.style.window_manager_mut().tick(Instant::now());
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        for window in &self.windows {
            let window = window.borrow();
            let visible = float_rect_visible(window.rect, area);
            if visible.width == 0 || visible.height == 0 {
                continue;
            }
            let managed = self.window_manager().is_registered(window.id);
            let border_style = if managed {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            frame.render_widget(Clear, visible);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style);
            let header = Line::styled(
                format!(" {}", window.title),
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
            let label = if managed {
                Line::raw(" drag me / grab an edge")
            } else {
                Line::raw(" not managed")
            };
            let body = Paragraph::new(vec![header, Line::raw(""), label]).block(block);
            frame.render_widget(body, visible);
            let button = float_rect_visible(window.button_rect(), area);
            if button.width > 0 {
                frame.render_widget(
                    Paragraph::new(format!("[{:>3}]", window.clicks % 1000))
                        .style(Style::default().bg(Color::Gray).fg(Color::Black)),
                    button,
                );
            }
        }
        if !self.status.is_empty() && area.height > 0 {
            let status = Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(self.status.as_str()).style(Style::default().fg(Color::Yellow)),
                status,
            );
        }
    }
}

/// Terminal area as manager screen bounds; one cell is one pixel.
fn screen_bounds(area: Rect) -> FloatRect {
    FloatRect::new(
        i32::from(area.x),
        i32::from(area.y),
        area.width,
        area.height,
    )
}

fn float_rect_visible(rect: FloatRect, bounds: Rect) -> Rect {
    let bounds_x0 = bounds.x as i32;
    let bounds_y0 = bounds.y as i32;
    let bounds_x1 = bounds_x0 + bounds.width as i32;
    let bounds_y1 = bounds_y0 + bounds.height as i32;
    let x0 = rect.x.max(bounds_x0);
    let y0 = rect.y.max(bounds_y0);
    let x1 = rect.right().min(bounds_x1);
    let y1 = rect.bottom().min(bounds_y1);
    if x1 <= x0 || y1 <= y0 {
        return Rect::default();
    }
    Rect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1 - x0) as u16,
        height: (y1 - y0) as u16,
    }
}
