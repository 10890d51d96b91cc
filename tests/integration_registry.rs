mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{Command, Pointer, RecordingWindow, SCREEN, scenario_window};
use frameless_wm::event::{Hit, PointerEvent, TapEvent, WidgetKind};
use frameless_wm::style::StyleAdapter;
use frameless_wm::window::{DragPhase, FloatRect, Point, WindowHandle, WindowId, WindowManager};

fn start_drag(wm: &mut WindowManager, p: &mut Pointer) {
    wm.filter_event(&p.press(300, 200));
    wm.filter_event(&p.drag(320, 200));
    assert_eq!(wm.phase(), DragPhase::Dragging);
}

#[test]
fn unregistered_window_passes_through() {
    let mut wm = WindowManager::new(SCREEN);
    let managed = scenario_window(1);
    let other = scenario_window(2);
    wm.register_widget(managed.clone());

    let mut p = Pointer::on(2);
    assert!(!wm.filter_event(&p.press(300, 200)));
    assert!(!wm.filter_event(&p.drag(400, 300)));
    assert!(!wm.filter_event(&p.release(400, 300)));
    assert!(!wm.filter_event(&TapEvent::Destroyed(WindowId::new(2))));

    assert_eq!(wm.phase(), DragPhase::Idle);
    assert!(other.borrow().log.is_empty());
    assert!(managed.borrow().log.is_empty());
}

#[test]
fn registration_is_idempotent_and_tap_is_lazy() {
    let mut wm = WindowManager::new(SCREEN);
    assert!(!wm.tap_installed());

    let win = scenario_window(1);
    assert!(wm.register_widget(win.clone()));
    assert!(!wm.register_widget(win.clone()));
    assert_eq!(wm.registered_count(), 1);
    assert!(wm.tap_installed());

    let second = scenario_window(2);
    wm.register_widget(second.clone());
    assert!(wm.unregister_widget(WindowId::new(1)));
    assert!(!wm.unregister_widget(WindowId::new(1)));
    assert!(wm.tap_installed());

    assert!(wm.unregister_widget(WindowId::new(2)));
    assert!(!wm.tap_installed());
    assert!(!wm.unregister_widget(WindowId::new(99)));
}

#[test]
fn opted_out_window_is_never_managed() {
    let mut wm = WindowManager::new(SCREEN);
    let mut window = RecordingWindow::new(1, FloatRect::new(100, 100, 400, 300));
    window.opt_in = Some(false);
    let win = window.shared();
    assert!(!wm.register_widget(win.clone()));
    assert!(!wm.tap_installed());

    let mut p = Pointer::on(1);
    assert!(!wm.filter_event(&p.press(300, 200)));
    assert!(!wm.filter_event(&p.drag(350, 250)));
    assert!(win.borrow().log.is_empty());
}

#[test]
fn unregister_mid_drag_stops_all_commands() {
    let mut wm = WindowManager::new(SCREEN);
    let win = scenario_window(1);
    wm.register_widget(win.clone());
    let mut p = Pointer::on(1);
    start_drag(&mut wm, &mut p);
    let issued = win.borrow().log.len();

    assert!(wm.unregister_widget(WindowId::new(1)));
    assert_eq!(wm.phase(), DragPhase::Idle);
    assert!(!wm.filter_event(&p.drag(500, 400)));
    assert!(!wm.filter_event(&p.release(500, 400)));
    assert_eq!(win.borrow().log.len(), issued);
}

#[test]
fn destroyed_event_unregisters_and_cancels() {
    let mut wm = WindowManager::new(SCREEN);
    let win = scenario_window(1);
    wm.register_widget(win.clone());
    let mut p = Pointer::on(1);
    start_drag(&mut wm, &mut p);

    win.borrow_mut().destroyed = true;
    assert!(!wm.filter_event(&TapEvent::Destroyed(WindowId::new(1))));
    assert_eq!(wm.phase(), DragPhase::Idle);
    assert!(!wm.is_registered(WindowId::new(1)));
    assert!(!wm.tap_installed());
}

#[test]
fn destroyed_command_forgets_window() {
    let mut wm = WindowManager::new(SCREEN);
    let win = scenario_window(1);
    wm.register_widget(win.clone());
    let mut p = Pointer::on(1);
    start_drag(&mut wm, &mut p);

    // destruction without a notification reaching the tap
    win.borrow_mut().destroyed = true;
    wm.filter_event(&p.drag(400, 300));
    assert_eq!(wm.phase(), DragPhase::Idle);
    assert!(!wm.is_registered(WindowId::new(1)));
}

#[test]
fn hidden_and_focus_loss_cancel_but_keep_registration() {
    let mut wm = WindowManager::new(SCREEN);
    let win = scenario_window(1);
    wm.register_widget(win.clone());

    let mut p = Pointer::on(1);
    start_drag(&mut wm, &mut p);
    wm.filter_event(&TapEvent::Hidden(WindowId::new(1)));
    assert_eq!(wm.phase(), DragPhase::Idle);
    assert!(wm.is_registered(WindowId::new(1)));

    start_drag(&mut wm, &mut p);
    let issued = win.borrow().log.len();
    wm.filter_event(&TapEvent::FocusLost(WindowId::new(1)));
    assert_eq!(wm.phase(), DragPhase::Idle);
    assert!(!wm.filter_event(&p.drag(600, 500)));
    assert_eq!(win.borrow().log.len(), issued);
}

#[test]
fn reparented_window_is_dropped() {
    let mut wm = WindowManager::new(SCREEN);
    let win = scenario_window(1);
    wm.register_widget(win.clone());
    wm.filter_event(&TapEvent::Reparented(WindowId::new(1)));
    assert!(!wm.is_registered(WindowId::new(1)));
    assert_eq!(wm.registered_count(), 0);
}

#[test]
fn interactive_widgets_keep_their_presses() {
    let mut wm = WindowManager::new(SCREEN);
    let win = scenario_window(1);
    wm.register_widget(win.clone());

    for widget in [WidgetKind::Button, WidgetKind::Input, WidgetKind::Slider] {
        let mut p = Pointer::on_widget(1, widget);
        assert!(!wm.filter_event(&p.press(300, 200)));
        assert!(!wm.filter_event(&p.drag(360, 260)));
        assert!(!wm.filter_event(&p.release(360, 260)));
        assert_eq!(wm.phase(), DragPhase::Idle);
    }
    assert!(win.borrow().log.is_empty());
}

#[test]
fn fixed_size_window_moves_from_its_edges() {
    let mut wm = WindowManager::new(SCREEN);
    let mut window = RecordingWindow::new(1, FloatRect::new(100, 100, 400, 300));
    window.resizable = false;
    let win = window.shared();
    wm.register_widget(win.clone());

    let mut p = Pointer::on(1);
    wm.filter_event(&p.press(100, 100));
    wm.filter_event(&p.drag(150, 140));
    assert_eq!(wm.phase(), DragPhase::Dragging);
    assert_eq!(win.borrow().log, vec![Command::Move(Point::new(150, 140))]);
}

#[test]
fn independent_windows_do_not_interfere() {
    let mut wm = WindowManager::new(SCREEN);
    let a = scenario_window(1);
    let b = RecordingWindow::new(2, FloatRect::new(600, 100, 400, 300)).shared();
    wm.register_widget(a.clone());
    wm.register_widget(b.clone());

    let mut p = Pointer::on(2);
    wm.filter_event(&p.press(800, 200));
    wm.filter_event(&p.drag(820, 220));
    wm.filter_event(&p.release(820, 220));

    assert!(a.borrow().log.is_empty());
    assert_eq!(b.borrow().rect.origin(), Point::new(620, 120));
}

#[test]
fn style_adapter_registers_through_polish() {
    let mut style = StyleAdapter::new(WindowManager::new(SCREEN));
    let win: Rc<RefCell<RecordingWindow>> = scenario_window(1);
    let handle: WindowHandle = win.clone();
    style.polish(&handle);
    assert!(style.window_manager().is_registered(WindowId::new(1)));

    let press = PointerEvent::press(
        Point::new(300, 200),
        Some(Hit::surface(WindowId::new(1))),
    );
    assert!(style.filter_event(&TapEvent::Pointer(press)));

    style.unpolish(&handle);
    assert!(!style.window_manager().is_registered(WindowId::new(1)));
    assert_eq!(style.window_manager().phase(), DragPhase::Idle);
}
