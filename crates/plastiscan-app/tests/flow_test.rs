//! End-to-end tests for the capture → analyzing → result flow

use async_trait::async_trait;
use plastiscan_app::{Screen, ScreenFlowController};
use plastiscan_domain::{compute_impact, lookup, ItemWeight, PlasticGrade};
use plastiscan_types::{ImageHandle, ImageSource, ScanError};
use plastiscan_vision::{CameraDevice, CameraStream, Classifier, FrameSource, NoCamera};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tokio::runtime::Handle;

const DELAY: Duration = Duration::from_millis(3000);

struct FixedClassifier {
    grade: u8,
    delay: Duration,
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _image: &ImageHandle) -> Result<&'static PlasticGrade, ScanError> {
        tokio::time::sleep(self.delay).await;
        lookup(self.grade).ok_or(ScanError::AnalysisCancelled)
    }
}

struct MockCamera {
    released: Arc<AtomicBool>,
}

struct MockSource {
    released: Arc<AtomicBool>,
}

impl CameraDevice for MockCamera {
    fn name(&self) -> &str {
        "mock"
    }

    fn open(&mut self) -> Result<CameraStream, ScanError> {
        self.released.store(false, Ordering::SeqCst);
        Ok(CameraStream::new(
            "mock",
            Box::new(MockSource {
                released: self.released.clone(),
            }),
        ))
    }
}

impl FrameSource for MockSource {
    fn grab(&mut self, frame: u64) -> Result<ImageHandle, ScanError> {
        ImageHandle::from_encoded(png_bytes(4, 4), ImageSource::Camera { frame })
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image::RgbImage::new(width, height)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn photo() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bottle.png");
    std::fs::write(&path, png_bytes(8, 6)).unwrap();
    (dir, path)
}

fn controller(grade: u8) -> (ScreenFlowController, Arc<AtomicBool>) {
    let released = Arc::new(AtomicBool::new(false));
    let controller = ScreenFlowController::builder(Handle::current())
        .classifier(Arc::new(FixedClassifier { grade, delay: DELAY }))
        .camera(Box::new(MockCamera {
            released: released.clone(),
        }))
        .build();
    (controller, released)
}

#[tokio::test(start_paused = true)]
async fn test_camera_scan_reaches_result() {
    let (mut flow, released) = controller(1);

    flow.start_camera().unwrap();
    assert!(flow.session().camera_active);
    assert!(flow.is_camera_active());

    flow.capture_photo().unwrap();
    assert_eq!(flow.screen(), Screen::Analyzing);
    assert!(released.load(Ordering::SeqCst), "camera must be released once a photo is taken");
    assert!(!flow.session().camera_active);

    let grade = flow.wait_for_result().await.unwrap();
    assert_eq!(grade.name, "PET");
    assert_eq!(flow.screen(), Screen::Result);

    flow.settle_animation().await;
    let expected = compute_impact(lookup(1).unwrap(), 0.5);
    assert!(flow.displayed_impact().approx_eq(&expected, 1e-9));
    assert!((flow.displayed_impact().carbon - 1.15).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_upload_and_adjust_weight() {
    let (mut flow, _) = controller(2);
    let (_dir, path) = photo();

    flow.upload(Some(&path)).unwrap();
    let image = flow.session().captured_image.clone().unwrap();
    assert_eq!(image.path(), Some(path.as_path()));
    assert_eq!(image.dimensions(), (8, 6));

    flow.wait_for_result().await.unwrap();
    flow.set_weight(1.0).unwrap();
    flow.settle_animation().await;

    let shown = flow.displayed_impact();
    assert!((shown.carbon - 1.8).abs() < 1e-9);
    assert!((shown.water - 15.2).abs() < 1e-9);
    assert!((shown.energy - 76.0).abs() < 1e-9);
    assert!((shown.recycling_rate - 31.0).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_camera_denied_stays_on_capture() {
    let mut flow = ScreenFlowController::builder(Handle::current())
        .camera(Box::new(NoCamera))
        .build();

    let err = flow.start_camera().unwrap_err();
    assert!(matches!(err, ScanError::DeviceUnavailable(_)));
    assert_eq!(flow.screen(), Screen::Capture);
    assert!(!flow.session().camera_active);

    // upload is still offered
    let (_dir, path) = photo();
    flow.upload(Some(&path)).unwrap();
    assert_eq!(flow.screen(), Screen::Analyzing);
}

#[tokio::test(start_paused = true)]
async fn test_dismissed_picker_changes_nothing() {
    let (mut flow, _) = controller(1);
    let before = flow.session().clone();

    assert_eq!(flow.upload(None).unwrap_err(), ScanError::NoFileSelected);
    assert_eq!(flow.session(), &before);
}

#[tokio::test(start_paused = true)]
async fn test_corrupt_upload_is_rejected() {
    let (mut flow, _) = controller(1);
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not an image").unwrap();

    let err = flow.upload(Some(&path)).unwrap_err();
    assert!(matches!(err, ScanError::UnreadableFile(_)));
    assert_eq!(flow.screen(), Screen::Capture);
}

#[tokio::test(start_paused = true)]
async fn test_second_upload_while_analyzing_is_busy() {
    let (mut flow, _) = controller(3);
    let (_dir, path) = photo();

    flow.upload(Some(&path)).unwrap();
    let first = flow.session().captured_image.clone();

    assert_eq!(flow.upload(Some(&path)).unwrap_err(), ScanError::BusyAnalyzing);
    assert_eq!(flow.capture_photo().unwrap_err(), ScanError::BusyAnalyzing);
    assert_eq!(flow.screen(), Screen::Analyzing);
    assert_eq!(flow.session().captured_image, first);

    let grade = flow.wait_for_result().await.unwrap();
    assert_eq!(grade.grade, 3);
}

#[tokio::test(start_paused = true)]
async fn test_pump_applies_result_without_blocking() {
    let (mut flow, _) = controller(4);
    let (_dir, path) = photo();
    flow.upload(Some(&path)).unwrap();

    assert!(!flow.pump().unwrap());
    assert_eq!(flow.screen(), Screen::Analyzing);

    tokio::time::sleep(DELAY + Duration::from_millis(100)).await;
    assert!(flow.pump().unwrap());
    assert_eq!(flow.screen(), Screen::Result);
    assert_eq!(flow.session().detected_grade.map(|g| g.name), Some("LDPE"));
}

#[tokio::test(start_paused = true)]
async fn test_scan_another_releases_everything() {
    let (mut flow, released) = controller(5);

    flow.start_camera().unwrap();
    flow.capture_photo().unwrap();
    flow.wait_for_result().await.unwrap();
    flow.set_weight(1.7).unwrap();

    flow.scan_another().unwrap();
    let session = flow.session();
    assert_eq!(session.screen, Screen::Capture);
    assert!(session.captured_image.is_none());
    assert!(session.detected_grade.is_none());
    assert_eq!(session.item_weight, ItemWeight::default());
    assert!(!flow.is_camera_active());
    assert!(released.load(Ordering::SeqCst));
    assert!(!flow.is_animating());
    assert!(flow.target_impact().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_weight_changes_show_last_value() {
    let (mut flow, _) = controller(1);
    let (_dir, path) = photo();
    flow.upload(Some(&path)).unwrap();
    flow.wait_for_result().await.unwrap();

    flow.set_weight(2.0).unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    flow.set_weight(0.1).unwrap();
    flow.settle_animation().await;

    tokio::time::sleep(Duration::from_millis(5000)).await;
    flow.pump().unwrap();

    let expected = compute_impact(lookup(1).unwrap(), 0.1);
    assert!(flow.displayed_impact().approx_eq(&expected, 1e-9));
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_analysis_never_lands() {
    let (mut flow, _) = controller(2);
    let (_dir, path) = photo();
    flow.upload(Some(&path)).unwrap();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    flow.cancel_analysis().unwrap();
    assert_eq!(flow.screen(), Screen::Capture);
    assert!(flow.session().captured_image.is_none());

    tokio::time::sleep(DELAY * 2).await;
    assert!(!flow.pump().unwrap());
    assert_eq!(flow.screen(), Screen::Capture);
    assert!(flow.session().detected_grade.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_timeout_returns_to_capture() {
    let mut flow = ScreenFlowController::builder(Handle::current())
        .classifier(Arc::new(FixedClassifier {
            grade: 1,
            delay: Duration::from_secs(10),
        }))
        .analysis_timeout(Some(Duration::from_secs(1)))
        .build();
    let (_dir, path) = photo();
    flow.upload(Some(&path)).unwrap();

    let err = flow.wait_for_result().await.unwrap_err();
    assert_eq!(err, ScanError::AnalysisCancelled);
    assert_eq!(flow.screen(), Screen::Capture);
}

#[tokio::test(start_paused = true)]
async fn test_result_screen_rejects_capture_events() {
    let (mut flow, _) = controller(1);
    let (_dir, path) = photo();
    flow.upload(Some(&path)).unwrap();
    flow.wait_for_result().await.unwrap();

    assert!(matches!(
        flow.upload(Some(&path)),
        Err(ScanError::InvalidTransition { .. })
    ));
    assert!(matches!(
        flow.start_camera(),
        Err(ScanError::InvalidTransition { .. })
    ));
    assert_eq!(flow.screen(), Screen::Result);
}

#[tokio::test(start_paused = true)]
async fn test_analysis_captions_progress() {
    let (mut flow, _) = controller(1);
    let (_dir, path) = photo();
    flow.upload(Some(&path)).unwrap();

    assert_eq!(flow.visible_steps(), 0);
    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert_eq!(flow.visible_steps(), 2);
}
