use image::RgbaImage;

use crate::mapper::Scale;
use crate::overlay::Overlay;

// ── Prompts ─────────────────────────────────────────────────────────────────

/// A clicked point, in original-image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointPrompt {
    pub x: u32,
    pub y: u32,
}

/// A dragged box, in original-image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxPrompt {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

/// A rectangle in display space as produced by the drag gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DisplayRect {
    /// Rectangle spanned by two corners in any order.
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: a.0.abs_diff(b.0),
            height: a.1.abs_diff(b.1),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn top_left(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn bottom_right(&self) -> (u32, u32) {
        (self.x + self.width, self.y + self.height)
    }
}

// ── Events / Reports ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Click { x: u32, y: u32 },
    BeginBox,
    DragComplete { rect: DisplayRect },
    DragCancelled,
    Reset,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Displaying,
    BoxDragging,
    Terminated,
}

/// What a handled event has to say to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    PointAdded { index: usize, point: PointPrompt },
    BoxStarted,
    BoxSelected(BoxPrompt),
    Reset,
    Final(Vec<PointPrompt>),
}

// ── Session ─────────────────────────────────────────────────────────────────

pub struct Session {
    scale: Scale,
    original_size: (u32, u32),
    points: Vec<PointPrompt>,
    last_box: Option<BoxPrompt>,
    overlay: Overlay,
    state: SessionState,
}

impl Session {
    /// `display` is the already scaled image; `original_size` is the size of
    /// the image it was scaled from.
    pub fn new(display: RgbaImage, original_size: (u32, u32), scale: Scale) -> Self {
        Self {
            scale,
            original_size,
            points: Vec::new(),
            last_box: None,
            overlay: Overlay::new(display),
            state: SessionState::Displaying,
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn original_size(&self) -> (u32, u32) {
        self.original_size
    }

    pub fn points(&self) -> &[PointPrompt] {
        &self.points
    }

    pub fn last_box(&self) -> Option<BoxPrompt> {
        self.last_box
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Applies one event. Events that do not apply to the current state are
    /// dropped without output.
    pub fn handle(&mut self, event: SessionEvent) -> Option<Report> {
        log::debug!("{:?} <- {:?}", self.state, event);
        match (self.state, event) {
            (SessionState::Displaying, SessionEvent::Click { x, y }) => Some(self.add_point(x, y)),
            (SessionState::Displaying, SessionEvent::BeginBox) => {
                self.state = SessionState::BoxDragging;
                Some(Report::BoxStarted)
            }
            (SessionState::BoxDragging, SessionEvent::DragComplete { rect }) => {
                self.state = SessionState::Displaying;
                if rect.is_degenerate() {
                    log::debug!("ignoring degenerate box {:?}", rect);
                    return None;
                }
                Some(self.apply_box(rect))
            }
            (SessionState::BoxDragging, SessionEvent::DragCancelled) => {
                self.state = SessionState::Displaying;
                None
            }
            (SessionState::Displaying, SessionEvent::Reset) => {
                self.points.clear();
                self.last_box = None;
                self.overlay.clear();
                Some(Report::Reset)
            }
            (SessionState::Terminated, _) => None,
            (_, SessionEvent::Quit) => Some(self.finish()),
            (state, event) => {
                log::trace!("{:?} ignored in {:?}", event, state);
                None
            }
        }
    }

    /// Moves to `Terminated` and yields the final listing. Safe to call more
    /// than once; later calls return an empty listing.
    pub fn finish(&mut self) -> Report {
        if self.state == SessionState::Terminated {
            return Report::Final(Vec::new());
        }
        self.state = SessionState::Terminated;
        Report::Final(self.points.clone())
    }

    fn add_point(&mut self, x: u32, y: u32) -> Report {
        let (ox, oy) = self.scale.to_original(x, y);
        let point = PointPrompt { x: ox, y: oy };
        self.points.push(point);
        self.overlay.draw_marker(x, y);
        self.overlay.draw_label(x, y, format!("({},{})", ox, oy));
        Report::PointAdded {
            index: self.points.len(),
            point,
        }
    }

    fn apply_box(&mut self, rect: DisplayRect) -> Report {
        let (x0, y0) = rect.top_left();
        let (x1, y1) = rect.bottom_right();
        let (x_min, y_min) = self.scale.to_original(x0, y0);
        let (x_max, y_max) = self.scale.to_original(x1, y1);
        let prompt = BoxPrompt {
            x_min,
            y_min,
            x_max,
            y_max,
        };
        self.last_box = Some(prompt);

        self.overlay.clear();
        self.overlay.draw_box((x0, y0), (x1, y1));
        for p in &self.points {
            let (px, py) = self.scale.to_display(p.x, p.y);
            self.overlay.draw_marker(px, py);
        }
        Report::BoxSelected(prompt)
    }
}
