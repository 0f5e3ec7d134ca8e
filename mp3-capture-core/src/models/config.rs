/// Configuration for a capture session.
///
/// The encoder sample rate is never configured here: it is queried from the
/// capture provider at stop time so the encoder always sees the rate the
/// device actually delivers. Hardcoding a rate produces pitch-shifted output.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Constant bitrate for the MP3 stream, in kbit/s.
    pub bitrate_kbps: u32,
}

impl CaptureConfig {
    /// Standard 128 kbit/s mono capture.
    pub fn new() -> Self {
        Self { bitrate_kbps: 128 }
    }

    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bitrate_kbps == 0 {
            return Err("bitrate must be positive".into());
        }
        Ok(())
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::new()
    }
}
