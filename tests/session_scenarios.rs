use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use prompt_selector::error::SelectorError;
use prompt_selector::overlay::MARKER_COLOR;
use prompt_selector::report::PromptDocument;
use prompt_selector::session::{
    BoxPrompt, DisplayRect, PointPrompt, Report, Session, SessionEvent, SessionState,
};
use prompt_selector::{open_session, session_for_image};

const FILL: Rgba<u8> = Rgba([90, 120, 150, 255]);

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("prompt-selector-{}-{}", std::process::id(), name))
}

fn session(w: u32, h: u32) -> Session {
    session_for_image(&RgbaImage::from_pixel(w, h, FILL), 1200, 800)
}

fn click(s: &mut Session, x: u32, y: u32) -> Option<Report> {
    s.handle(SessionEvent::Click { x, y })
}

#[test]
fn large_image_walkthrough() {
    let mut s = session(2400, 1600);
    assert_eq!(s.scale().factor(), 0.5);
    assert_eq!(s.overlay().width(), 1200);
    assert_eq!(s.overlay().height(), 800);

    assert_eq!(
        click(&mut s, 100, 50),
        Some(Report::PointAdded {
            index: 1,
            point: PointPrompt { x: 200, y: 100 }
        })
    );
    let second = click(&mut s, 300, 300).expect("point report");
    assert!(second.to_string().ends_with("Point 2: X=600, Y=600"));

    assert_eq!(s.handle(SessionEvent::Reset), Some(Report::Reset));
    assert!(s.points().is_empty());
    assert_ne!(*s.overlay().buffer().get_pixel(100, 50), MARKER_COLOR);
    assert_ne!(*s.overlay().buffer().get_pixel(300, 300), MARKER_COLOR);
    assert!(s.overlay().labels().is_empty());

    assert_eq!(s.handle(SessionEvent::BeginBox), Some(Report::BoxStarted));
    let report = s.handle(SessionEvent::DragComplete {
        rect: DisplayRect::from_corners((10, 10), (110, 60)),
    });
    assert_eq!(
        report,
        Some(Report::BoxSelected(BoxPrompt {
            x_min: 20,
            y_min: 20,
            x_max: 220,
            y_max: 120
        }))
    );

    assert_eq!(s.handle(SessionEvent::Quit), Some(Report::Final(Vec::new())));
    assert_eq!(s.state(), SessionState::Terminated);
}

#[test]
fn small_image_is_not_scaled() {
    let mut s = session(800, 600);
    assert_eq!(s.scale().factor(), 1.0);
    assert_eq!(s.overlay().buffer().dimensions(), (800, 600));
    assert_eq!(
        click(&mut s, 50, 50),
        Some(Report::PointAdded {
            index: 1,
            point: PointPrompt { x: 50, y: 50 }
        })
    );
}

#[test]
fn quit_without_points_prints_nothing() {
    let mut s = session(640, 480);
    let last = s.finish();
    assert_eq!(last.to_string(), "");
}

#[test]
fn box_bounds_are_ordered() {
    let mut s = session(3000, 2000);
    let corners = [
        ((5, 5), (60, 70)),
        ((400, 300), (20, 10)),
        ((0, 799), (1199, 0)),
    ];
    for (a, b) in corners {
        s.handle(SessionEvent::BeginBox);
        match s.handle(SessionEvent::DragComplete {
            rect: DisplayRect::from_corners(a, b),
        }) {
            Some(Report::BoxSelected(bx)) => {
                assert!(bx.x_min <= bx.x_max);
                assert!(bx.y_min <= bx.y_max);
            }
            other => panic!("expected a box, got {:?}", other),
        }
    }
}

#[test]
fn clicks_after_box_keep_numbering() {
    let mut s = session(2400, 1600);
    click(&mut s, 10, 10);
    s.handle(SessionEvent::BeginBox);
    s.handle(SessionEvent::DragComplete {
        rect: DisplayRect::from_corners((0, 0), (50, 50)),
    });
    match click(&mut s, 20, 20) {
        Some(Report::PointAdded { index, point }) => {
            assert_eq!(index, 2);
            assert_eq!(point, PointPrompt { x: 40, y: 40 });
        }
        other => panic!("unexpected {:?}", other),
    }
    let doc = PromptDocument::from_session(std::path::Path::new("x.png"), &s);
    assert_eq!(doc.points, vec![[20, 20], [40, 40]]);
    assert_eq!(doc.bbox, Some([0, 0, 100, 100]));
}

#[test]
fn open_session_reads_and_scales_file() {
    let path = scratch_path("big.png");
    RgbaImage::from_pixel(2400, 1600, FILL).save(&path).unwrap();
    let s = open_session(&path, 1200, 800).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(s.original_size(), (2400, 1600));
    assert_eq!(s.overlay().buffer().dimensions(), (1200, 800));
}

#[test]
fn open_session_rejects_missing_file() {
    let path = scratch_path("does-not-exist.png");
    match open_session(&path, 1200, 800) {
        Err(SelectorError::ImageLoad { path: p, .. }) => assert_eq!(p, path),
        Err(other) => panic!("wrong error {:?}", other),
        Ok(_) => panic!("expected failure"),
    }
}

#[test]
fn open_session_rejects_undecodable_file() {
    let path = scratch_path("garbage.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    let result = open_session(&path, 1200, 800);
    std::fs::remove_file(&path).ok();

    let err = result.err().expect("decode should fail");
    assert!(err.to_string().starts_with("Could not load image: "));
}
