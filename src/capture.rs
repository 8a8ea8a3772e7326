//! PNG frame sequence output.
//!
//! Every rendered frame can be handed to a [`PngSequence`], which writes
//! `frame_<N>.png` into its output directory. `N` starts at 0 and advances on
//! every frame, including frames whose write failed, so gaps in the sequence
//! line up with the frames that were dropped.
//!
//! ```no_run
//! use lorenz_wave::capture::{CapturedFrame, PngSequence, RowOrder};
//!
//! let mut frames = PngSequence::create("frames", RowOrder::TopDown)?;
//! let frame = CapturedFrame { width: 2, height: 1, pixels: vec![255; 8] };
//! frames.capture(&frame);
//! # Ok::<(), lorenz_wave::CaptureError>(())
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba};

use crate::error::CaptureError;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA8 framebuffer contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, R, G, B, A.
    pub pixels: Vec<u8>,
}

/// Scanline order of the incoming buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// First row is the top of the image; written as-is.
    #[default]
    TopDown,
    /// First row is the bottom of the image (GL convention); the last
    /// scanline is written first.
    BottomUp,
}

/// Writes numbered PNG frames into a directory.
#[derive(Debug)]
pub struct PngSequence {
    dir: PathBuf,
    row_order: RowOrder,
    next_frame: u64,
}

impl PngSequence {
    /// Create the output directory (and parents) if needed.
    pub fn create(dir: impl AsRef<Path>, row_order: RowOrder) -> Result<Self, CaptureError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| CaptureError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            row_order,
            next_frame: 0,
        })
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number the next frame will get.
    #[inline]
    pub fn next_frame(&self) -> u64 {
        self.next_frame
    }

    /// Path of frame `number` inside the output directory.
    pub fn frame_path(&self, number: u64) -> PathBuf {
        self.dir.join(format!("frame_{}.png", number))
    }

    /// Write the next frame, consuming a frame number whether or not it succeeds.
    pub fn write(&mut self, frame: &CapturedFrame) -> Result<PathBuf, CaptureError> {
        let number = self.next_frame;
        self.next_frame += 1;

        let path = self.frame_path(number);
        let image = to_image(frame, self.row_order)?;
        image.save_with_format(&path, image::ImageFormat::Png)?;
        Ok(path)
    }

    /// Give up the next frame number without writing anything.
    pub fn skip(&mut self) {
        log::warn!("no pixels for frame {}, skipping", self.next_frame);
        self.next_frame += 1;
    }

    /// Write the next frame; failures are logged and the frame is skipped.
    pub fn capture(&mut self, frame: &CapturedFrame) -> Option<PathBuf> {
        let number = self.next_frame;
        match self.write(frame) {
            Ok(path) => {
                log::debug!("wrote {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::error!("skipping capture of frame {}: {}", number, e);
                None
            }
        }
    }

    /// Account for one rendered frame: write it if there are pixels, skip otherwise.
    pub fn record(&mut self, frame: Option<&CapturedFrame>) -> Option<PathBuf> {
        match frame {
            Some(frame) => self.capture(frame),
            None => {
                self.skip();
                None
            }
        }
    }
}

/// Build an RGBA image from a raw frame, reordering rows as requested.
///
/// Top-down frames borrow the frame's pixels; only a flip allocates.
pub fn to_image(
    frame: &CapturedFrame,
    row_order: RowOrder,
) -> Result<ImageBuffer<Rgba<u8>, Cow<'_, [u8]>>, CaptureError> {
    let expected = frame.width as usize * frame.height as usize * BYTES_PER_PIXEL;
    if frame.pixels.len() != expected {
        return Err(CaptureError::BufferSize {
            expected,
            actual: frame.pixels.len(),
        });
    }

    let pixels = match row_order {
        RowOrder::TopDown => Cow::Borrowed(frame.pixels.as_slice()),
        RowOrder::BottomUp => {
            let stride = frame.width as usize * BYTES_PER_PIXEL;
            let mut flipped = Vec::with_capacity(expected);
            if stride > 0 {
                for row in frame.pixels.chunks_exact(stride).rev() {
                    flipped.extend_from_slice(row);
                }
            }
            Cow::Owned(flipped)
        }
    };

    ImageBuffer::from_raw(frame.width, frame.height, pixels).ok_or(CaptureError::BufferSize {
        expected,
        actual: frame.pixels.len(),
    })
}
