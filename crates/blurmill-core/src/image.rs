//! Planar image model: one grid of samples per color channel.

/// Number of color channels in every image this pipeline handles.
///
/// Fixed at three (RGB) for the lifetime of this design: no alpha,
/// no grayscale variant.
pub const NUM_CHANNELS: usize = 3;

/// A rectangular grid of 8-bit samples, row-major, dimensions fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl Channel {
    /// Create a channel filled with a single value.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    /// Create a channel from an existing row-major sample buffer.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != width * height`.
    pub fn from_samples(width: usize, height: usize, samples: Vec<u8>) -> Self {
        assert_eq!(
            samples.len(),
            width * height,
            "sample buffer does not match {width}x{height}"
        );
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.samples[row * self.width + col]
    }

    /// Overwrite the sample at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.samples[row * self.width + col] = value;
    }

    /// Raw row-major samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

/// An RGB image as [`NUM_CHANNELS`] planar channels sharing one geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    channels: [Channel; NUM_CHANNELS],
}

impl Image {
    /// Assemble an image from its channels.
    ///
    /// # Panics
    ///
    /// Panics if the channels do not all share the same dimensions.
    pub fn new(channels: [Channel; NUM_CHANNELS]) -> Self {
        let (w, h) = (channels[0].width(), channels[0].height());
        assert!(
            channels.iter().all(|c| c.width() == w && c.height() == h),
            "image channels must share dimensions"
        );
        Self { channels }
    }

    pub fn width(&self) -> usize {
        self.channels[0].width()
    }

    pub fn height(&self) -> usize {
        self.channels[0].height()
    }

    pub fn channels(&self) -> &[Channel; NUM_CHANNELS] {
        &self.channels
    }

    pub fn into_channels(self) -> [Channel; NUM_CHANNELS] {
        self.channels
    }

    /// Build a new image by transforming each channel independently.
    pub fn map_channels<F>(&self, f: F) -> Self
    where
        F: Fn(&Channel) -> Channel,
    {
        let [r, g, b] = &self.channels;
        Self::new([f(r), f(g), f(b)])
    }
}
