use vision_sense::app::{App, AppEvent};
use vision_sense::common::{DetBox, Detection, DetectionResult};
use vision_sense::render::{OverlayRenderer, OverlayStyle, RasterSurface};
use vision_sense::state::{AppState, Highlight};

use fake_services::{cat_file, coordinator, FakeDetectionApi, FakeMediaHost, RecordingNotifier};
use recording_surface::{Op, RecordingSurface};

fn two_pets() -> DetectionResult {
    DetectionResult::new(
        "https://host/pets.jpg",
        vec![
            Detection::new("cat", 0.93, DetBox::new(100., 100., 300., 300.)),
            Detection::new("dog", 0.81, DetBox::new(500., 200., 900., 700.)),
        ],
    )
}

fn loaded_app(result: DetectionResult) -> App<RecordingSurface> {
    let mut app = App::new(
        coordinator(FakeMediaHost::hosting(&result.image_url), FakeDetectionApi::returning(result)),
        OverlayRenderer::default(),
        RecordingSurface::default(),
        Box::new(RecordingNotifier::default()),
    );
    app.handle(AppEvent::FileSelected(Some(cat_file())));
    let job = app.handle(AppEvent::DetectRequested).expect("upload starts");
    app.handle(AppEvent::UploadFinished(job.run_blocking()));
    app.handle(AppEvent::ImageLoaded {
        natural_width: 1000,
        natural_height: 800,
        client_width: 500,
        client_height: 400,
    });
    app
}

fn inked(surface: &RasterSurface) -> usize {
    surface.canvas().pixels().filter(|p| p[3] > 0).count()
}

#[test]
fn highlight_holds_one_index() {
    let mut highlight = Highlight::default();
    assert_eq!(highlight.index(), None);
    highlight.enter(2);
    highlight.enter(0);
    assert_eq!(highlight.index(), Some(0));
    assert!(highlight.is_active(0));
    assert!(!highlight.is_active(2));
    highlight.leave();
    assert_eq!(highlight.index(), None);
}

#[test]
fn hover_outside_result_is_ignored() {
    let mut state = AppState::new();
    assert!(!state.hover(0));

    state.set_result(two_pets());
    assert!(state.hover(1));
    assert!(!state.hover(5));
    assert_eq!(state.highlight.index(), Some(1));

    state.set_result(DetectionResult::new("https://host/empty.jpg", vec![]));
    assert_eq!(state.highlight.index(), None);
}

#[test]
fn pointer_enter_and_leave_redraw_with_emphasis() {
    let style = OverlayStyle::default();
    let mut app = loaded_app(two_pets());
    let drawn = app.surface().resets;
    assert!(drawn >= 1);

    app.handle(AppEvent::PointerEntered(1));
    let strokes = app.surface().strokes();
    assert_eq!(strokes[0].1, style.line_width);
    assert_eq!(strokes[1].1, style.active_line_width);
    assert_eq!(app.surface().resets, drawn + 1);

    app.handle(AppEvent::PointerLeft);
    assert!(app.surface().strokes().iter().all(|s| s.1 == style.line_width));
    assert_eq!(app.view().highlighted_entry(), None);
}

#[test]
fn resize_redraws_at_new_scale() {
    let mut app = loaded_app(two_pets());
    app.handle(AppEvent::PointerEntered(0));

    app.handle(AppEvent::Resized { client_width: 250, client_height: 200 });

    assert_eq!(app.surface().ops[0], Op::Reset(250, 200));
    let (rect, width, _) = app.surface().strokes()[0];
    assert_eq!((rect.x, rect.y, rect.w, rect.h), (25., 25., 50., 50.));
    assert_eq!(width, OverlayStyle::default().active_line_width);
}

#[test]
fn new_upload_resets_selection_and_overlay_inputs() {
    let mut app = loaded_app(two_pets());
    app.handle(AppEvent::PointerEntered(1));

    let job = app.handle(AppEvent::DetectRequested).expect("second upload starts");
    assert_eq!(app.surface().ops, vec![Op::Reset(0, 0)]);
    assert_eq!(app.state().highlight.index(), None);
    assert!(app.state().result.is_none());
    assert!(app.state().displayed.is_none());

    // Hovering while the list is gone has no effect.
    app.handle(AppEvent::PointerEntered(1));
    assert_eq!(app.state().highlight.index(), None);

    app.handle(AppEvent::UploadFinished(job.run_blocking()));
    assert_eq!(app.state().highlight.index(), None);
    assert_eq!(app.state().detection_count(), 2);
}

#[test]
fn empty_result_shows_message_and_draws_nothing() {
    let mut app = loaded_app(DetectionResult::new("https://host/empty.jpg", vec![]));

    assert_eq!(app.surface().resets, 0);
    let view = app.view();
    assert_eq!(view.badge.as_deref(), Some("0 objects detected"));
    assert_eq!(
        view.list_message,
        Some("No objects detected. Try a different image or adjust backend thresholds.")
    );
    assert!(view.highest.is_none());
    assert!(!app.redraw());
}

#[test]
fn replaced_result_starts_on_blank_canvas() {
    let mut app = App::new(
        coordinator(
            FakeMediaHost::hosting("https://host/pets.jpg"),
            FakeDetectionApi::returning(two_pets()),
        ),
        OverlayRenderer::default(),
        RasterSurface::new(OverlayStyle::default().font_px),
        Box::new(RecordingNotifier::default()),
    );
    app.handle(AppEvent::FileSelected(Some(cat_file())));
    let job = app.handle(AppEvent::DetectRequested).expect("upload starts");
    app.handle(AppEvent::UploadFinished(job.run_blocking()));
    app.handle(AppEvent::ImageLoaded {
        natural_width: 1000,
        natural_height: 800,
        client_width: 400,
        client_height: 320,
    });
    assert!(inked(app.surface()) > 0);

    let _pending = app.handle(AppEvent::DetectRequested).expect("second upload starts");
    assert_eq!(inked(app.surface()), 0);

    let empty = DetectionResult::new("https://host/empty.jpg", vec![]);
    app.handle(AppEvent::UploadFinished(Ok(empty)));
    app.handle(AppEvent::ImageLoaded {
        natural_width: 100,
        natural_height: 100,
        client_width: 100,
        client_height: 100,
    });
    assert_eq!(app.state().detection_count(), 0);
    assert_eq!(inked(app.surface()), 0);
}
