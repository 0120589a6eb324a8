//! The text UI window: grid, mapper, renderer, canvas and input in one owner.
//!
//! A `TextUiWindow` lives on the UI thread. Background tasks reach it only
//! through the [`UiHandle`] it hands out; [`TextUiWindow::pump`] applies
//! their requests and repaints at most once per call.

use std::time::Duration;

use anyhow::{Context, Result};
use textui_config::{Color, Config, ConfigError, config::validate_grid_params};
use textui_fonts::{
    CellMetrics, GlyphRasterizer, calculate_cell_metrics, font_size_to_pixels,
    load_monospace_font,
};
use textui_render::{Canvas, PixmapCanvas, Renderer};

use crate::grid::CellGrid;
use crate::input::{
    InputDispatcher, KeyboardEvent, KeyboardListener, ListenerHandle, PointerEvent,
    PointerListener,
};
use crate::mapper::CoordinateMapper;
use crate::ui_queue::{UiHandle, UiQueue, ui_channel};

/// Construction parameters for a window backed by a [`PixmapCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub cols: u32,
    pub rows: u32,
    pub font_family: String,
    pub font_bold: bool,
    /// Font size in points
    pub font_size: u32,
    /// Horizontal pixels between cells; must not be negative
    pub char_gap: i32,
    pub title_border_thickness: i32,
    pub text_foreground: Color,
    pub text_background: Color,
    pub blink_foreground: Color,
    pub blink_background: Color,
}

impl WindowSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cols: config.cols,
            rows: config.rows,
            font_family: config.font_family.clone(),
            font_bold: config.font_bold,
            font_size: config.font_size,
            char_gap: config.char_gap,
            title_border_thickness: config.title_border_thickness,
            text_foreground: config.text_foreground,
            text_background: config.text_background,
            blink_foreground: config.blink_foreground,
            blink_background: config.blink_background,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_grid_params(self.cols, self.rows, self.font_size, self.char_gap)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of one [`TextUiWindow::pump`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub mutations: usize,
    pub repainted: bool,
}

pub struct TextUiWindow<C: Canvas> {
    grid: CellGrid,
    mapper: CoordinateMapper,
    renderer: Renderer,
    canvas: C,
    input: InputDispatcher,
    queue: UiQueue,
    handle: UiHandle,
    needs_repaint: bool,
    repaint_count: u64,
}

impl TextUiWindow<PixmapCanvas> {
    /// Build a window with a system monospace font and an RGBA framebuffer
    /// sized to the grid.
    pub fn new(settings: &WindowSettings) -> Result<Self> {
        settings.validate()?;

        let font = load_monospace_font(&settings.font_family, settings.font_bold)
            .with_context(|| format!("Failed to load font '{}'", settings.font_family))?;
        let font_size_pixels = font_size_to_pixels(settings.font_size, 1.0);
        let metrics = calculate_cell_metrics(&font, font_size_pixels, settings.char_gap as u32);
        let (width, height) = metrics.grid_pixel_size(settings.cols, settings.rows);
        let canvas = PixmapCanvas::new(
            width,
            height,
            Some(GlyphRasterizer::new(font, font_size_pixels)),
        );

        let mut window = Self::with_canvas(settings.cols, settings.rows, metrics, canvas)?;
        window.apply_settings(settings);
        log::info!(
            "Created {}x{} text window ({}x{} px)",
            settings.cols,
            settings.rows,
            width,
            height
        );
        Ok(window)
    }
}

impl<C: Canvas> TextUiWindow<C> {
    /// Build a window over an existing canvas with explicit cell metrics.
    pub fn with_canvas(
        cols: u32,
        rows: u32,
        metrics: CellMetrics,
        canvas: C,
    ) -> Result<Self, ConfigError> {
        let grid = CellGrid::new(cols, rows)?;
        let (handle, queue) = ui_channel();
        Ok(Self {
            grid,
            mapper: CoordinateMapper::new(metrics),
            renderer: Renderer::new(metrics),
            canvas,
            input: InputDispatcher::new(),
            queue,
            handle,
            needs_repaint: true,
            repaint_count: 0,
        })
    }

    fn apply_settings(&mut self, settings: &WindowSettings) {
        self.mapper
            .set_title_border_thickness(settings.title_border_thickness);
        self.grid.set_text_foreground(settings.text_foreground);
        self.grid.set_text_background(settings.text_background);
        self.grid.set_blink_foreground(settings.blink_foreground);
        self.grid.set_blink_background(settings.blink_background);
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Direct grid access for the UI thread. Call [`Self::request_repaint`]
    /// afterwards if the change should become visible.
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn metrics(&self) -> CellMetrics {
        self.renderer.metrics()
    }

    pub fn preferred_width(&self) -> u32 {
        self.metrics().grid_pixel_size(self.grid.cols(), self.grid.rows()).0
    }

    pub fn preferred_height(&self) -> u32 {
        self.metrics().grid_pixel_size(self.grid.cols(), self.grid.rows()).1
    }

    pub fn set_title_border_thickness(&mut self, thickness: i32) {
        self.mapper.set_title_border_thickness(thickness);
    }

    /// A sender for background tasks.
    pub fn handle(&self) -> UiHandle {
        self.handle.clone()
    }

    pub fn add_pointer_listener(&mut self, listener: Box<dyn PointerListener>) -> ListenerHandle {
        self.input.add_pointer_listener(listener)
    }

    pub fn remove_pointer_listener(&mut self, handle: ListenerHandle) -> bool {
        self.input.remove_pointer_listener(handle)
    }

    pub fn add_keyboard_listener(&mut self, listener: Box<dyn KeyboardListener>) -> ListenerHandle {
        self.input.add_keyboard_listener(listener)
    }

    pub fn remove_keyboard_listener(&mut self, handle: ListenerHandle) -> bool {
        self.input.remove_keyboard_listener(handle)
    }

    /// Route a pointer event to the listeners; schedules a repaint if any
    /// listener was notified.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> usize {
        let notified = self
            .input
            .dispatch_pointer(&mut self.grid, &self.mapper, event);
        self.needs_repaint |= notified > 0;
        notified
    }

    pub fn handle_keyboard(&mut self, event: &KeyboardEvent) -> usize {
        let notified = self.input.dispatch_keyboard(&mut self.grid, event);
        self.needs_repaint |= notified > 0;
        notified
    }

    pub fn request_repaint(&mut self) {
        self.needs_repaint = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Number of full repaints performed so far.
    pub fn repaint_count(&self) -> u64 {
        self.repaint_count
    }

    /// Redraw the whole grid now.
    pub fn repaint(&mut self) {
        let frame = self.grid.frame();
        self.renderer.repaint(&mut self.canvas, &frame);
        self.needs_repaint = false;
        self.repaint_count += 1;
    }

    /// Redraw one cell now. Out-of-range cells are ignored.
    pub fn repaint_cell(&mut self, col: i32, row: i32) {
        if !self.grid.in_bounds(col, row) {
            return;
        }
        let frame = self.grid.frame();
        self.renderer
            .repaint_cell(&mut self.canvas, &frame, col as u32, row as u32);
    }

    /// Apply queued requests, then repaint once if anything asked for it.
    pub fn pump(&mut self) -> PumpReport {
        let outcome = self.queue.drain(&mut self.grid);
        self.finish_pump(outcome.mutations, outcome.repaint_requested)
    }

    /// Like [`Self::pump`], but wait up to `timeout` for the first request.
    pub fn pump_timeout(&mut self, timeout: Duration) -> PumpReport {
        let outcome = self.queue.drain_timeout(&mut self.grid, timeout);
        self.finish_pump(outcome.mutations, outcome.repaint_requested)
    }

    fn finish_pump(&mut self, mutations: usize, repaint_requested: bool) -> PumpReport {
        let repainted = repaint_requested || self.needs_repaint;
        if repainted {
            self.repaint();
        }
        PumpReport {
            mutations,
            repainted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, PointerEventKind};
    use crate::mapper::CellPos;
    use textui_render::PixelRect;

    #[derive(Default)]
    struct CountingCanvas {
        fills: usize,
        glyphs: usize,
    }

    impl Canvas for CountingCanvas {
        fn size(&self) -> (u32, u32) {
            (0, 0)
        }
        fn fill_rect(&mut self, _rect: PixelRect, _color: Color) {
            self.fills += 1;
        }
        fn draw_glyph(&mut self, _ch: char, _pen_x: i32, _baseline_y: i32, _color: Color) {
            self.glyphs += 1;
        }
    }

    fn window(cols: u32, rows: u32) -> TextUiWindow<CountingCanvas> {
        TextUiWindow::with_canvas(
            cols,
            rows,
            CellMetrics::new(8, 16, 1, 12),
            CountingCanvas::default(),
        )
        .unwrap()
    }

    struct Stamp;

    impl PointerListener for Stamp {
        fn on_click(&mut self, grid: &mut CellGrid, _event: &PointerEvent, pos: CellPos) {
            grid.set_char(pos.col, pos.row, '*');
        }
    }

    impl KeyboardListener for Stamp {
        fn on_key_down(&mut self, grid: &mut CellGrid, _key: Key) {
            grid.set_char(0, 0, 'k');
        }
    }

    #[test]
    fn test_preferred_size_counts_gap_once() {
        let w = window(10, 5);
        assert_eq!(w.preferred_width(), 90);
        assert_eq!(w.preferred_height(), 80);
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let result = TextUiWindow::with_canvas(
            0,
            5,
            CellMetrics::new(8, 16, 0, 12),
            CountingCanvas::default(),
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_settings_validation_rejects_negative_gap() {
        let settings = WindowSettings {
            char_gap: -1,
            ..WindowSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_repaint_draws_every_cell() {
        let mut w = window(4, 3);
        w.repaint();
        assert_eq!(w.canvas().fills, 12);
        assert_eq!(w.canvas().glyphs, 12);
        assert!(!w.needs_repaint());
        assert_eq!(w.repaint_count(), 1);
    }

    #[test]
    fn test_repaint_cell_skips_out_of_range() {
        let mut w = window(4, 3);
        w.repaint_cell(1, 1);
        w.repaint_cell(4, 0);
        w.repaint_cell(-1, 0);
        assert_eq!(w.canvas().fills, 1);
    }

    #[test]
    fn test_pump_applies_queue_and_repaints_once() {
        let mut w = window(5, 2);
        w.repaint();
        let handle = w.handle();
        handle
            .mutate_and_repaint(|g| {
                g.print_text(0, 0, "ab");
            })
            .unwrap();
        handle
            .mutate_and_repaint(|g| {
                g.print_text(0, 1, "cd");
            })
            .unwrap();

        let report = w.pump();
        assert_eq!(
            report,
            PumpReport {
                mutations: 2,
                repainted: true
            }
        );
        assert_eq!(w.repaint_count(), 2);
        assert_eq!(w.grid().row_text(1).unwrap(), "cd   ");

        assert_eq!(w.pump(), PumpReport::default());
    }

    #[test]
    fn test_pointer_dispatch_maps_through_title_border() {
        let mut w = window(10, 5);
        w.set_title_border_thickness(20);
        w.add_pointer_listener(Box::new(Stamp));
        w.repaint();

        let notified = w.handle_pointer(&PointerEvent::new(PointerEventKind::Click, 9, 20 + 16));
        assert_eq!(notified, 1);
        assert_eq!(w.grid().get_char(1, 1), Ok('*'));
        assert!(w.needs_repaint());
    }

    #[test]
    fn test_dispatch_without_listeners_does_not_schedule_repaint() {
        let mut w = window(3, 3);
        w.repaint();
        assert_eq!(w.handle_keyboard(&KeyboardEvent::KeyDown(Key::Enter)), 0);
        assert!(!w.needs_repaint());
    }

    #[test]
    fn test_keyboard_listener_removal() {
        let mut w = window(3, 3);
        let id = w.add_keyboard_listener(Box::new(Stamp));
        assert!(w.remove_keyboard_listener(id));
        w.handle_keyboard(&KeyboardEvent::KeyDown(Key::Enter));
        assert_eq!(w.grid().get_char(0, 0), Ok(' '));
    }
}
