//! The window: shows the overlay, turns pointer and key input into session
//! events and prints what the session reports.

use std::path::Path;

use eframe::egui;
use image::RgbaImage;

use crate::error::SelectorError;
use crate::report;
use crate::session::{DisplayRect, Session, SessionEvent, SessionState};

const LABEL_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 0, 255);

// ── Interaction State ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum DragState {
    None,
    Selecting { start: (u32, u32), end: (u32, u32) },
}

/// Which buffer the texture currently holds.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Shown {
    Overlay(u64),
    Base,
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct SelectorApp<'a> {
    session: &'a mut Session,
    texture: Option<egui::TextureHandle>,
    shown: Option<Shown>,
    drag: DragState,
    closing: bool,
}

impl<'a> SelectorApp<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self {
            session,
            texture: None,
            shown: None,
            drag: DragState::None,
            closing: false,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: SessionEvent) {
        if let Some(r) = self.session.handle(event) {
            report::print_report(&r);
        }
        // the overlay may have changed; upload it on the next frame
        ctx.request_repaint();
    }

    fn display_size(&self) -> (u32, u32) {
        let ov = self.session.overlay();
        (ov.width(), ov.height())
    }

    /// During the box gesture the clean image is shown, as the rectangle
    /// tool does not draw on the overlay.
    fn ensure_texture(&mut self, ctx: &egui::Context) {
        let overlay = self.session.overlay();
        let (wanted, img): (Shown, &RgbaImage) = match self.session.state() {
            SessionState::BoxDragging => (Shown::Base, overlay.base()),
            _ => (Shown::Overlay(overlay.revision()), overlay.buffer()),
        };
        if self.shown == Some(wanted) {
            return;
        }
        let size = [img.width() as usize, img.height() as usize];
        let pixels = img.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
        match self.texture.as_mut() {
            Some(tex) => tex.set(color_image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("display", color_image, egui::TextureOptions::NEAREST));
            }
        }
        self.shown = Some(wanted);
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (quit, begin_box, reset, confirm, cancel) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Q),
                i.key_pressed(egui::Key::B),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::C),
            )
        });

        match self.session.state() {
            SessionState::Displaying => {
                if quit {
                    log::debug!("quit requested");
                    self.closing = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                } else if begin_box {
                    self.drag = DragState::None;
                    self.dispatch(ctx, SessionEvent::BeginBox);
                } else if reset {
                    self.dispatch(ctx, SessionEvent::Reset);
                }
            }
            SessionState::BoxDragging => {
                if confirm {
                    let rect = match self.drag {
                        DragState::Selecting { start, end } => DisplayRect::from_corners(start, end),
                        DragState::None => DisplayRect::default(),
                    };
                    self.drag = DragState::None;
                    self.dispatch(ctx, SessionEvent::DragComplete { rect });
                } else if cancel {
                    self.drag = DragState::None;
                    self.dispatch(ctx, SessionEvent::DragCancelled);
                }
            }
            SessionState::Terminated => {}
        }
    }

    fn handle_pointer(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        image_rect: egui::Rect,
    ) {
        let size = self.display_size();
        match self.session.state() {
            SessionState::Displaying => {
                let pressed = ctx.input(|i| i.pointer.primary_pressed());
                if pressed && response.hovered() {
                    let pos = ctx.input(|i| i.pointer.interact_pos());
                    if let Some((x, y)) = pos.and_then(|p| screen_to_display(image_rect, p, size)) {
                        self.dispatch(ctx, SessionEvent::Click { x, y });
                    }
                }
            }
            SessionState::BoxDragging => {
                if response.drag_started_by(egui::PointerButton::Primary) {
                    // egui reports the drag only past its threshold; anchor at the press
                    let origin = ctx.input(|i| i.pointer.press_origin());
                    if let Some(pos) = origin.or(response.interact_pointer_pos()) {
                        let start = clamp_to_display(image_rect, pos, size);
                        self.drag = DragState::Selecting { start, end: start };
                    }
                }
                if response.dragged_by(egui::PointerButton::Primary) {
                    if let (DragState::Selecting { start, .. }, Some(pos)) =
                        (self.drag, response.interact_pointer_pos())
                    {
                        let end = clamp_to_display(image_rect, pos, size);
                        self.drag = DragState::Selecting { start, end };
                    }
                }
            }
            SessionState::Terminated => {}
        }
    }

    fn draw_labels(&self, painter: &egui::Painter, image_rect: egui::Rect) {
        for label in self.session.overlay().labels() {
            let pos = display_to_screen(image_rect, label.pos, self.display_size());
            painter.text(
                pos,
                egui::Align2::LEFT_BOTTOM,
                &label.text,
                egui::FontId::proportional(13.0),
                LABEL_COLOR,
            );
        }
    }

    fn draw_selection(&self, painter: &egui::Painter, image_rect: egui::Rect) {
        let DragState::Selecting { start, end } = self.drag else {
            return;
        };
        let size = self.display_size();
        let a = display_to_screen(image_rect, start, size);
        let b = display_to_screen(image_rect, end, size);
        let rect = egui::Rect::from_two_pos(a, b);
        let stroke = egui::Stroke::new(2.0, SELECTION_COLOR);
        painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);

        // crosshair through the centre
        let c = rect.center();
        painter.line_segment([egui::pos2(rect.left(), c.y), egui::pos2(rect.right(), c.y)], stroke);
        painter.line_segment([egui::pos2(c.x, rect.top()), egui::pos2(c.x, rect.bottom())], stroke);
    }
}

// ── Coordinate helpers ──────────────────────────────────────────────────────

/// Screen position -> display pixel, or `None` when outside the image.
pub fn screen_to_display(
    image_rect: egui::Rect,
    pos: egui::Pos2,
    (w, h): (u32, u32),
) -> Option<(u32, u32)> {
    if !image_rect.contains(pos) {
        return None;
    }
    let rel = pos - image_rect.min;
    let x = (rel.x * w as f32 / image_rect.width()).floor() as u32;
    let y = (rel.y * h as f32 / image_rect.height()).floor() as u32;
    Some((x.min(w.saturating_sub(1)), y.min(h.saturating_sub(1))))
}

/// Like `screen_to_display` but pins outside positions to the image edge,
/// so a drag leaving the window still spans up to the border.
pub fn clamp_to_display(image_rect: egui::Rect, pos: egui::Pos2, (w, h): (u32, u32)) -> (u32, u32) {
    let rel = pos - image_rect.min;
    let x = (rel.x * w as f32 / image_rect.width()).clamp(0.0, w as f32);
    let y = (rel.y * h as f32 / image_rect.height()).clamp(0.0, h as f32);
    (x.round() as u32, y.round() as u32)
}

pub fn display_to_screen(image_rect: egui::Rect, (x, y): (u32, u32), (w, h): (u32, u32)) -> egui::Pos2 {
    image_rect.min
        + egui::vec2(
            x as f32 * image_rect.width() / w.max(1) as f32,
            y as f32 * image_rect.height() / h.max(1) as f32,
        )
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for SelectorApp<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.closing {
            self.handle_keys(ctx);
        }
        self.ensure_texture(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let canvas_rect = response.rect;
                painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

                let (w, h) = self.display_size();
                let image_rect =
                    egui::Rect::from_min_size(canvas_rect.min, egui::vec2(w as f32, h as f32));

                if let Some(ref tex) = self.texture {
                    painter.image(
                        tex.id(),
                        image_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                if self.closing {
                    return;
                }
                self.handle_pointer(ctx, &response, image_rect);

                match self.session.state() {
                    SessionState::BoxDragging => self.draw_selection(&painter, image_rect),
                    _ => self.draw_labels(&painter, image_rect),
                }
            });
    }
}

// ── Entry ───────────────────────────────────────────────────────────────────

pub fn window_title(image_path: &Path) -> String {
    format!(
        "Image Selector - {}",
        image_path.file_name().unwrap_or_default().to_string_lossy()
    )
}

/// Opens the window and blocks until it is closed. The session is handed
/// back untouched by the window once this returns.
pub fn run(session: &mut Session, title: &str) -> Result<(), SelectorError> {
    let overlay = session.overlay();
    let size = [overlay.width() as f32, overlay.height() as f32];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_resizable(false)
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(SelectorApp::new(session)))),
    )?;
    Ok(())
}
