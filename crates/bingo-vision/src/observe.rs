use image::GrayImage;

/// Receives every intermediate grid the pipeline produces, in order.
///
/// The pipeline itself never writes debug output; callers that want stage
/// dumps (an animation, individual files) implement this and decide what to
/// keep. Stage names are stable identifiers like `"backdrop-filled"`.
pub trait StageObserver {
    fn stage(&mut self, name: &str, frame: &GrayImage);
}

/// Observer that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StageObserver for NullObserver {
    fn stage(&mut self, _name: &str, _frame: &GrayImage) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::StageObserver;
    use image::GrayImage;

    /// Test observer that records stage names and frame sizes.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub stages: Vec<(String, u32, u32)>,
    }

    impl StageObserver for RecordingObserver {
        fn stage(&mut self, name: &str, frame: &GrayImage) {
            self.stages.push((name.to_string(), frame.width(), frame.height()));
        }
    }
}
