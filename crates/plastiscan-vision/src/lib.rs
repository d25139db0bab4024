//! Vision module - image acquisition and plastic grade classification

pub mod capture;
pub mod classifier;

pub use capture::{
    is_supported_image, read_selected_file, scan_directory, CameraDevice, CameraStream,
    FrameDirectoryCamera, FrameSource, NoCamera, IMAGE_EXTENSIONS,
};
pub use classifier::{visible_analysis_steps, Classifier, RandomClassifier, ANALYSIS_STEPS};
