//! Pointer and keyboard event routing.
//!
//! Raw pointer events carry pixel coordinates; the dispatcher maps them to a
//! [`CellPos`] and fans them out to every registered [`PointerListener`].
//! Keyboard events go to every [`KeyboardListener`]. Listeners run on the UI
//! thread and receive the grid mutably, so callbacks can edit cells directly.

use crate::grid::CellGrid;
use crate::mapper::{CellPos, CoordinateMapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Click,
    Enter,
    Exit,
    Press,
    Release,
    Move,
    Drag,
}

/// Pointer event in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }
}

/// Keys the grid distinguishes; everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Backspace,
    Tab,
    Escape,
    Character(char),
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// A character produced by the keyboard, after layout translation
    Typed(char),
}

/// Receives pointer events already mapped to grid cells.
///
/// Every method has an empty default so implementors pick what they need.
/// The cell position is not guaranteed to be inside the grid.
#[allow(unused_variables)]
pub trait PointerListener {
    fn on_click(&mut self, grid: &mut CellGrid, event: &PointerEvent, pos: CellPos) {}
    fn on_enter(&mut self, grid: &mut CellGrid, event: &PointerEvent, pos: CellPos) {}
    fn on_exit(&mut self, grid: &mut CellGrid, event: &PointerEvent, pos: CellPos) {}
    fn on_press(&mut self, grid: &mut CellGrid, event: &PointerEvent, pos: CellPos) {}
    fn on_release(&mut self, grid: &mut CellGrid, event: &PointerEvent, pos: CellPos) {}
    fn on_move(&mut self, grid: &mut CellGrid, event: &PointerEvent, pos: CellPos) {}
    fn on_drag(&mut self, grid: &mut CellGrid, event: &PointerEvent, pos: CellPos) {}
}

#[allow(unused_variables)]
pub trait KeyboardListener {
    fn on_key_down(&mut self, grid: &mut CellGrid, key: Key) {}
    fn on_key_up(&mut self, grid: &mut CellGrid, key: Key) {}
    fn on_key_typed(&mut self, grid: &mut CellGrid, ch: char) {}
}

/// Registration handle returned when a listener is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Ordered listener lists with handle-based removal.
///
/// Listeners are owned by the dispatcher, so the same instance can never be
/// registered twice; removing an unknown handle is a no-op.
#[derive(Default)]
pub struct InputDispatcher {
    next_id: u64,
    pointer_listeners: Vec<(ListenerHandle, Box<dyn PointerListener>)>,
    keyboard_listeners: Vec<(ListenerHandle, Box<dyn KeyboardListener>)>,
}

impl std::fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("pointer_listeners", &self.pointer_listeners.len())
            .field("keyboard_listeners", &self.keyboard_listeners.len())
            .finish()
    }
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> ListenerHandle {
        self.next_id += 1;
        ListenerHandle(self.next_id)
    }

    pub fn add_pointer_listener(&mut self, listener: Box<dyn PointerListener>) -> ListenerHandle {
        let handle = self.next_handle();
        self.pointer_listeners.push((handle, listener));
        handle
    }

    /// Returns `false` when `handle` was not registered.
    pub fn remove_pointer_listener(&mut self, handle: ListenerHandle) -> bool {
        let before = self.pointer_listeners.len();
        self.pointer_listeners.retain(|(h, _)| *h != handle);
        self.pointer_listeners.len() != before
    }

    pub fn add_keyboard_listener(&mut self, listener: Box<dyn KeyboardListener>) -> ListenerHandle {
        let handle = self.next_handle();
        self.keyboard_listeners.push((handle, listener));
        handle
    }

    pub fn remove_keyboard_listener(&mut self, handle: ListenerHandle) -> bool {
        let before = self.keyboard_listeners.len();
        self.keyboard_listeners.retain(|(h, _)| *h != handle);
        self.keyboard_listeners.len() != before
    }

    pub fn pointer_listener_count(&self) -> usize {
        self.pointer_listeners.len()
    }

    pub fn keyboard_listener_count(&self) -> usize {
        self.keyboard_listeners.len()
    }

    /// Map `event` to a cell and deliver it once to each pointer listener.
    ///
    /// Returns the number of listeners notified.
    pub fn dispatch_pointer(
        &mut self,
        grid: &mut CellGrid,
        mapper: &CoordinateMapper,
        event: &PointerEvent,
    ) -> usize {
        let pos = mapper.pixel_to_cell(event.x, event.y);
        log::trace!(
            "Pointer {:?} at ({}, {}) -> cell ({}, {})",
            event.kind,
            event.x,
            event.y,
            pos.col,
            pos.row
        );
        for (_, listener) in &mut self.pointer_listeners {
            match event.kind {
                PointerEventKind::Click => listener.on_click(grid, event, pos),
                PointerEventKind::Enter => listener.on_enter(grid, event, pos),
                PointerEventKind::Exit => listener.on_exit(grid, event, pos),
                PointerEventKind::Press => listener.on_press(grid, event, pos),
                PointerEventKind::Release => listener.on_release(grid, event, pos),
                PointerEventKind::Move => listener.on_move(grid, event, pos),
                PointerEventKind::Drag => listener.on_drag(grid, event, pos),
            }
        }
        self.pointer_listeners.len()
    }

    /// Deliver `event` once to each keyboard listener.
    pub fn dispatch_keyboard(&mut self, grid: &mut CellGrid, event: &KeyboardEvent) -> usize {
        log::trace!("Keyboard {:?}", event);
        for (_, listener) in &mut self.keyboard_listeners {
            match *event {
                KeyboardEvent::KeyDown(key) => listener.on_key_down(grid, key),
                KeyboardEvent::KeyUp(key) => listener.on_key_up(grid, key),
                KeyboardEvent::Typed(ch) => listener.on_key_typed(grid, ch),
            }
        }
        self.keyboard_listeners.len()
    }
}
