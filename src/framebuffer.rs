//! Working and cache frame buffers
//!
//! The working buffer holds the most recent canvas. The cache buffer holds
//! what the glass shows, and is handed to the panel driver as the old frame
//! so it can compute pixel transitions.
//!
//! Both buffers are always the same length and start zeroed (blank).
//!
//! ## Example
//!
//! ```
//! use eink_node::FrameBuffers;
//!
//! let mut frames = FrameBuffers::<[u8; 16]>::blank();
//! frames.working_mut()[0] = 0xAA;
//! assert!(!frames.is_consistent());
//!
//! frames.snapshot();
//! assert!(frames.is_consistent());
//! ```

use crate::canvas::Canvas;
use crate::error::FrameSizeMismatch;

/// Buffer selector for [`FrameBuffers::copy_into`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Latest rendered canvas
    Working,
    /// Snapshot of what the panel shows
    Cache,
}

/// The pair of frame buffers owned by the display orchestrator
///
/// ## Type Parameters
///
/// * `B` - Buffer type, e.g. `[u8; FRAME_SIZE]` or `&'static mut [u8]`
pub struct FrameBuffers<B> {
    working: B,
    cache: B,
}

impl<B> FrameBuffers<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Take ownership of two buffers and zero them
    ///
    /// # Errors
    ///
    /// Returns [`FrameSizeMismatch`] if the buffers differ in length.
    pub fn new(mut working: B, mut cache: B) -> Result<Self, FrameSizeMismatch> {
        let expected = working.as_ref().len();
        let provided = cache.as_ref().len();
        if expected != provided {
            return Err(FrameSizeMismatch { expected, provided });
        }
        working.as_mut().fill(0);
        cache.as_mut().fill(0);
        Ok(Self { working, cache })
    }

    /// Frame size in bytes
    pub fn frame_size(&self) -> usize {
        self.working.as_ref().len()
    }

    /// The latest rendered canvas
    pub fn working(&self) -> &[u8] {
        self.working.as_ref()
    }

    /// Mutable working buffer, the target of canvas copies
    pub fn working_mut(&mut self) -> &mut [u8] {
        self.working.as_mut()
    }

    /// Snapshot of what the panel currently shows
    pub fn cache(&self) -> &[u8] {
        self.cache.as_ref()
    }

    /// Old and new frame, in the order the panel driver expects them
    pub fn frames(&self) -> (&[u8], &[u8]) {
        (self.cache.as_ref(), self.working.as_ref())
    }

    /// Byte-exact copy of one full frame from `src` into `dst`
    ///
    /// Entry point for frames produced outside the canvas, such as a stored
    /// image. Canvas contents arrive through [`load_canvas`](Self::load_canvas).
    ///
    /// # Errors
    ///
    /// Returns [`FrameSizeMismatch`] if `src` is not exactly one frame long.
    pub fn copy_into(&mut self, dst: Frame, src: &[u8]) -> Result<(), FrameSizeMismatch> {
        let expected = self.frame_size();
        if src.len() != expected {
            return Err(FrameSizeMismatch {
                expected,
                provided: src.len(),
            });
        }
        match dst {
            Frame::Working => self.working.as_mut().copy_from_slice(src),
            Frame::Cache => self.cache.as_mut().copy_from_slice(src),
        }
        Ok(())
    }

    /// Pull the canvas into the working buffer
    ///
    /// # Errors
    ///
    /// Returns [`FrameSizeMismatch`] if the canvas is not exactly one frame
    /// long. The working buffer is left untouched in that case.
    pub fn load_canvas<G: Canvas>(&mut self, canvas: &G) -> Result<(), FrameSizeMismatch> {
        let expected = self.frame_size();
        let provided = canvas.frame_size();
        if provided != expected {
            return Err(FrameSizeMismatch { expected, provided });
        }
        canvas.copy_canvas_into(self.working.as_mut());
        log::trace!("loaded {} byte canvas", expected);
        Ok(())
    }

    /// Copy the working buffer into the cache buffer
    pub fn snapshot(&mut self) {
        self.cache.as_mut().copy_from_slice(self.working.as_ref());
        log::trace!("cached {} byte frame", self.frame_size());
    }

    /// Whether the cache matches the working buffer bit-for-bit
    pub fn is_consistent(&self) -> bool {
        self.working.as_ref() == self.cache.as_ref()
    }
}

impl<const N: usize> FrameBuffers<[u8; N]> {
    /// Two zeroed frames held inline
    pub const fn blank() -> Self {
        Self {
            working: [0; N],
            cache: [0; N],
        }
    }
}

#[cfg(any(test, feature = "alloc"))]
impl FrameBuffers<alloc::vec::Vec<u8>> {
    /// Two zeroed frames of `frame_size` bytes on the heap
    pub fn zeroed(frame_size: usize) -> Self {
        Self {
            working: alloc::vec![0; frame_size],
            cache: alloc::vec![0; frame_size],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCanvas, new_log};

    #[test]
    fn test_blank_frames_are_zeroed() {
        let frames = FrameBuffers::<[u8; 8]>::blank();
        assert_eq!(frames.frame_size(), 8);
        assert!(frames.working().iter().all(|b| *b == 0));
        assert!(frames.cache().iter().all(|b| *b == 0));
        assert!(frames.is_consistent());
    }

    #[test]
    fn test_new_zeroes_provided_buffers() {
        let frames = FrameBuffers::new(alloc::vec![0xFFu8; 4], alloc::vec![0x11u8; 4]).unwrap();
        assert_eq!(frames.working(), &[0, 0, 0, 0]);
        assert_eq!(frames.cache(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let result = FrameBuffers::new(alloc::vec![0u8; 4], alloc::vec![0u8; 3]);
        assert!(matches!(
            result,
            Err(FrameSizeMismatch {
                expected: 4,
                provided: 3
            })
        ));
    }

    #[test]
    fn test_copy_into_requires_full_frame() {
        let mut frames = FrameBuffers::<[u8; 4]>::blank();
        assert!(frames.copy_into(Frame::Working, &[1, 2, 3]).is_err());
        assert!(frames.copy_into(Frame::Working, &[1, 2, 3, 4, 5]).is_err());
        assert!(frames.copy_into(Frame::Cache, &[9, 9, 9, 9]).is_ok());
        assert_eq!(frames.cache(), &[9, 9, 9, 9]);
        assert_eq!(frames.working(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_snapshot_makes_cache_match_working() {
        let mut frames = FrameBuffers::<[u8; 4]>::blank();
        frames.copy_into(Frame::Working, &[1, 2, 3, 4]).unwrap();
        let (old, new) = frames.frames();
        assert_eq!(old, &[0, 0, 0, 0]);
        assert_eq!(new, &[1, 2, 3, 4]);

        frames.snapshot();
        assert!(frames.is_consistent());
        assert_eq!(frames.cache(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_load_canvas_fills_working_only() {
        let log = new_log();
        let mut canvas = MockCanvas::new(&log, 4);
        canvas.draw_text_at("ab", 0, 0);

        let mut frames = FrameBuffers::<[u8; 4]>::blank();
        frames.load_canvas(&canvas).unwrap();
        assert_eq!(frames.working(), &[b'a', b'b', 0, 0]);
        assert_eq!(frames.cache(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_load_canvas_rejects_other_frame_size() {
        let log = new_log();
        let mut canvas = MockCanvas::new(&log, 5);
        canvas.draw_text_at("abcde", 0, 0);

        let mut frames = FrameBuffers::<[u8; 4]>::blank();
        let result = frames.load_canvas(&canvas);
        assert!(matches!(
            result,
            Err(FrameSizeMismatch {
                expected: 4,
                provided: 5
            })
        ));
        assert_eq!(frames.working(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_zeroed_heap_frames() {
        let mut frames = FrameBuffers::zeroed(6);
        assert_eq!(frames.frame_size(), 6);
        assert!(frames.is_consistent());
        frames.copy_into(Frame::Working, &[1; 6]).unwrap();
        frames.snapshot();
        assert_eq!(frames.cache(), &[1; 6]);
    }
}
