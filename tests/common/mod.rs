#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use frameless_wm::event::{Hit, PointerEvent, TapEvent, WidgetKind};
use frameless_wm::window::{
    FloatRect, MaximizeMode, Point, Size, ToplevelWindow, WindowError, WindowId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Point),
    Resize(FloatRect),
    Maximize(MaximizeMode),
}

/// Window double that applies every command and keeps a log of them.
#[derive(Debug)]
pub struct RecordingWindow {
    pub id: WindowId,
    pub rect: FloatRect,
    pub min: Size,
    pub resizable: bool,
    pub opt_in: Option<bool>,
    pub destroyed: bool,
    pub log: Vec<Command>,
}

impl RecordingWindow {
    pub fn new(id: u64, rect: FloatRect) -> Self {
        Self {
            id: WindowId::new(id),
            rect,
            min: Size::new(200, 150),
            resizable: true,
            opt_in: None,
            destroyed: false,
            log: Vec::new(),
        }
    }

    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

impl ToplevelWindow for RecordingWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn geometry(&self) -> FloatRect {
        self.rect
    }

    fn min_size(&self) -> Size {
        self.min
    }

    fn is_resizable(&self) -> bool {
        self.resizable
    }

    fn bool_property(&self, name: &str) -> Option<bool> {
        if name == frameless_wm::constants::OPT_IN_PROPERTY {
            self.opt_in
        } else {
            None
        }
    }

    fn move_to(&mut self, origin: Point) -> Result<(), WindowError> {
        if self.destroyed {
            return Err(WindowError::Destroyed);
        }
        self.rect = self.rect.with_origin(origin);
        self.log.push(Command::Move(origin));
        Ok(())
    }

    fn resize_to(&mut self, geometry: FloatRect) -> Result<(), WindowError> {
        if self.destroyed {
            return Err(WindowError::Destroyed);
        }
        self.rect = geometry;
        self.log.push(Command::Resize(geometry));
        Ok(())
    }

    fn maximize(&mut self, mode: MaximizeMode) -> Result<(), WindowError> {
        if self.destroyed {
            return Err(WindowError::Destroyed);
        }
        self.log.push(Command::Maximize(mode));
        Ok(())
    }
}

/// A single 1920x1080 desktop.
pub const SCREEN: FloatRect = FloatRect::new(0, 0, 1920, 1080);

/// The window from the reference scenarios: (100,100) 400x300, min 200x150.
pub fn scenario_window(id: u64) -> Rc<RefCell<RecordingWindow>> {
    RecordingWindow::new(id, FloatRect::new(100, 100, 400, 300)).shared()
}

/// Builds pointer sequences with strictly increasing timestamps far enough
/// apart that no two presses count as a double press.
pub struct Pointer {
    pub target: Option<Hit>,
    now: Instant,
}

impl Pointer {
    pub fn on(id: u64) -> Self {
        Self::on_widget(id, WidgetKind::Surface)
    }

    pub fn on_widget(id: u64, widget: WidgetKind) -> Self {
        Self {
            target: Some(Hit {
                window: WindowId::new(id),
                widget,
            }),
            now: Instant::now(),
        }
    }

    pub fn nowhere() -> Self {
        Self {
            target: None,
            now: Instant::now(),
        }
    }

    fn step(&mut self) -> Instant {
        self.now += Duration::from_secs(1);
        self.now
    }

    pub fn press(&mut self, x: i32, y: i32) -> TapEvent {
        let at = self.step();
        TapEvent::Pointer(PointerEvent::press(Point::new(x, y), self.target).at(at))
    }

    pub fn drag(&mut self, x: i32, y: i32) -> TapEvent {
        let at = self.step();
        TapEvent::Pointer(PointerEvent::drag(Point::new(x, y), self.target).at(at))
    }

    pub fn release(&mut self, x: i32, y: i32) -> TapEvent {
        let at = self.step();
        TapEvent::Pointer(PointerEvent::release(Point::new(x, y), self.target).at(at))
    }
}
