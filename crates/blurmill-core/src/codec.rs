//! Image codec boundary: the only place pixel data enters or leaves.
//!
//! The pipeline consumes decoding and encoding through the [`ImageCodec`]
//! trait, so container formats, compression, and color handling stay outside
//! the core. [`FileCodec`] is the production implementation on top of the
//! `image` crate.

use image::ImageReader;
use std::path::Path;

use crate::error::PipelineError;
use crate::image::{Channel, Image, NUM_CHANNELS};

/// Decode/encode contract between the workers and the outside world.
///
/// Both operations are synchronous and atomic from the worker's point of
/// view. Implementations must be safe to share across worker threads.
pub trait ImageCodec: Send + Sync {
    /// Read and decode the file at `path` into a planar RGB image.
    fn decode(&self, path: &Path) -> Result<Image, PipelineError>;

    /// Encode `image` and write it to `path`.
    fn encode(&self, path: &Path, image: &Image) -> Result<(), PipelineError>;
}

/// Filesystem-backed codec using the `image` crate.
///
/// The container format is guessed from file content on decode (a misnamed
/// PNG still decodes) and taken from the target extension on encode.
#[derive(Debug, Default)]
pub struct FileCodec;

impl ImageCodec for FileCodec {
    fn decode(&self, path: &Path) -> Result<Image, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let reader = ImageReader::open(path)
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot open file: {e}"),
            })?
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {e}"),
            })?;

        if reader.format().is_none() {
            return Err(PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            });
        }

        let decoded = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        // Alpha and higher bit depths collapse to RGB8; the pipeline's image
        // model is exactly three 8-bit channels.
        let rgb = decoded.to_rgb8();
        let width = rgb.width() as usize;
        let height = rgb.height() as usize;

        let mut planes = [(); NUM_CHANNELS].map(|_| vec![0u8; width * height]);
        for (i, pixel) in rgb.pixels().enumerate() {
            for (c, plane) in planes.iter_mut().enumerate() {
                plane[i] = pixel.0[c];
            }
        }

        let [r, g, b] = planes;
        Ok(Image::new([
            Channel::from_samples(width, height, r),
            Channel::from_samples(width, height, g),
            Channel::from_samples(width, height, b),
        ]))
    }

    fn encode(&self, path: &Path, image: &Image) -> Result<(), PipelineError> {
        let width = image.width();
        let height = image.height();
        let channels = image.channels();

        let mut data = vec![0u8; width * height * NUM_CHANNELS];
        for i in 0..width * height {
            for (c, channel) in channels.iter().enumerate() {
                data[i * NUM_CHANNELS + c] = channel.samples()[i];
            }
        }

        image::save_buffer(
            path,
            &data,
            width as u32,
            height as u32,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
