//! Console output. Everything here goes to stdout for the user; diagnostics
//! use `log` instead.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::mapper::Scale;
use crate::session::{BoxPrompt, PointPrompt, Report, Session};

impl fmt::Display for PointPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X={}, Y={}", self.x, self.y)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::PointAdded { index, point } => {
                write!(f, "\n📍 Point {}: {}", index, point)
            }
            Report::BoxStarted => {
                write!(f, "\nDraw a box (click and drag), then press ENTER or SPACE")
            }
            Report::BoxSelected(b) => {
                writeln!(f, "\n📦 Box Prompts:")?;
                writeln!(f, "   X Min: {}", b.x_min)?;
                writeln!(f, "   Y Min: {}", b.y_min)?;
                writeln!(f, "   X Max: {}", b.x_max)?;
                write!(f, "   Y Max: {}", b.y_max)
            }
            Report::Reset => write!(f, "\n🔄 Reset"),
            Report::Final(points) => {
                // nothing at all when no point was recorded
                if points.is_empty() {
                    return Ok(());
                }
                write!(f, "\n=== Final Point Prompts ===")?;
                for (i, p) in points.iter().enumerate() {
                    write!(f, "\nPoint {}: {}", i + 1, p)?;
                }
                Ok(())
            }
        }
    }
}

/// Prints a report unless it renders to nothing.
pub fn print_report(report: &Report) {
    let text = report.to_string();
    if !text.is_empty() {
        println!("{}", text);
    }
}

pub fn scale_line(orig: (u32, u32), display: (u32, u32), scale: Scale) -> Option<String> {
    if !scale.is_scaled() {
        return None;
    }
    Some(format!(
        "📐 Scaled {}x{} → {}x{} (scale: {:.2})",
        orig.0,
        orig.1,
        display.0,
        display.1,
        scale.factor()
    ))
}

pub fn banner(orig: (u32, u32)) -> String {
    format!(
        "\n=== SAM2 Coordinate Selector ===\n\
         Original size: {}x{}\n\
         Left-click: Add point prompt\n\
         Press 'b': Draw bounding box\n\
         Press 'r': Reset\n\
         Press 'q': Quit\n",
        orig.0, orig.1
    )
}

// ── JSON ────────────────────────────────────────────────────────────────────

/// Machine-readable summary of a finished session.
#[derive(Debug, Serialize)]
pub struct PromptDocument {
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub points: Vec<[u32; 2]>,
    #[serde(rename = "box")]
    pub bbox: Option<[u32; 4]>,
}

impl PromptDocument {
    pub fn from_session(image_path: &Path, session: &Session) -> Self {
        let (width, height) = session.original_size();
        Self {
            image: image_path.display().to_string(),
            width,
            height,
            points: session.points().iter().map(|p| [p.x, p.y]).collect(),
            bbox: session.last_box().map(
                |BoxPrompt {
                     x_min,
                     y_min,
                     x_max,
                     y_max,
                 }| [x_min, y_min, x_max, y_max],
            ),
        }
    }
}
