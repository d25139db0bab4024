//! Capture sources: live camera streams and uploaded files
//!
//! Both variants hand back an `ImageHandle`; neither touches session state.

mod camera;
mod file;

pub use camera::{FrameDirectoryCamera, NoCamera};
pub use file::{is_supported_image, read_selected_file, scan_directory, IMAGE_EXTENSIONS};

use plastiscan_types::{ImageHandle, ScanError};
use tracing::debug;

/// A device that can open a live frame stream
pub trait CameraDevice: Send {
    /// Human-readable device name for logs and status lines
    fn name(&self) -> &str;

    /// Acquire the device. Fails with `DeviceUnavailable` when permission is
    /// denied or no camera exists.
    fn open(&mut self) -> Result<CameraStream, ScanError>;
}

/// Frame producer behind an open stream
pub trait FrameSource: Send {
    /// Grab the current frame; `frame` is the 1-based sequence number
    fn grab(&mut self, frame: u64) -> Result<ImageHandle, ScanError>;

    /// Release the underlying device. Called exactly once.
    fn release(&mut self) {}
}

/// An open camera stream.
///
/// The device is released by `close()` or, at the latest, when the stream is
/// dropped.
pub struct CameraStream {
    device: String,
    source: Box<dyn FrameSource>,
    frames: u64,
    open: bool,
}

impl CameraStream {
    pub fn new(device: impl Into<String>, source: Box<dyn FrameSource>) -> Self {
        let device = device.into();
        debug!(device = %device, "camera stream opened");
        Self {
            device,
            source,
            frames: 0,
            open: true,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Capture one frame from the stream
    pub fn capture(&mut self) -> Result<ImageHandle, ScanError> {
        if !self.open {
            return Err(ScanError::DeviceUnavailable(format!(
                "{}: stream is closed",
                self.device
            )));
        }
        self.frames += 1;
        self.source.grab(self.frames)
    }

    /// Release the device. Safe to call more than once.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.source.release();
            debug!(device = %self.device, frames = self.frames, "camera stream closed");
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraStream")
            .field("device", &self.device)
            .field("frames", &self.frames)
            .field("open", &self.open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plastiscan_types::ImageSource;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        releases: Arc<AtomicUsize>,
    }

    impl FrameSource for CountingSource {
        fn grab(&mut self, frame: u64) -> Result<ImageHandle, ScanError> {
            let mut buf = Cursor::new(Vec::new());
            image::RgbImage::new(2, 2)
                .write_to(&mut buf, image::ImageFormat::Png)
                .unwrap();
            ImageHandle::from_encoded(buf.into_inner(), ImageSource::Camera { frame })
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_stream() -> (CameraStream, Arc<AtomicUsize>) {
        let releases = Arc::new(AtomicUsize::new(0));
        let stream = CameraStream::new(
            "test",
            Box::new(CountingSource {
                releases: releases.clone(),
            }),
        );
        (stream, releases)
    }

    #[test]
    fn test_capture_numbers_frames() {
        let (mut stream, _) = counting_stream();
        let first = stream.capture().unwrap();
        let second = stream.capture().unwrap();
        assert_eq!(first.source(), &ImageSource::Camera { frame: 1 });
        assert_eq!(second.source(), &ImageSource::Camera { frame: 2 });
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut stream, releases) = counting_stream();
        stream.close();
        stream.close();
        assert!(!stream.is_open());
        drop(stream);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases_device() {
        let (stream, releases) = counting_stream();
        drop(stream);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_capture_after_close_fails() {
        let (mut stream, _) = counting_stream();
        stream.close();
        assert!(matches!(
            stream.capture(),
            Err(ScanError::DeviceUnavailable(_))
        ));
    }
}
