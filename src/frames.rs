//! Frame library: an ordered set of simulation snapshots and a playback cursor.
//!
//! Frames are opaque. Loading one is a side effect on the backend that the
//! frame itself owns; the library only decides *which* frame is current and
//! resets the world before handing it over.

use crate::backend::PhysicsBackend;
use crate::error::ViewError;
use std::fmt;
use std::rc::Rc;

/// A pre-recorded or externally driven simulation snapshot.
pub trait Frame<B> {
    /// Display name used by hosts and logs.
    fn name(&self) -> &str;
    /// Populates `backend` with this frame's bodies and joints.
    fn load(&self, backend: &mut B);
}

/// Shared handle to a frame. Identity is the allocation, not the contents.
pub type FrameHandle<B> = Rc<dyn Frame<B>>;

/// Playback state of a [`FrameLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Empty,
    Ready(usize),
}

pub struct FrameLibrary<B> {
    frames: Vec<FrameHandle<B>>,
    cursor: usize,
}

impl<B> Default for FrameLibrary<B> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            cursor: 0,
        }
    }
}

impl<B> fmt::Debug for FrameLibrary<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLibrary")
            .field("frames", &self.frames.iter().map(|fr| fr.name()).collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<B> FrameLibrary<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        if self.frames.is_empty() {
            PlaybackState::Empty
        } else {
            PlaybackState::Ready(self.cursor)
        }
    }

    /// The frame under the cursor.
    pub fn current(&self) -> Option<&FrameHandle<B>> {
        self.frames.get(self.cursor)
    }

    pub fn get(&self, index: usize) -> Option<&FrameHandle<B>> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameHandle<B>> {
        self.frames.iter()
    }

    /// Appends a frame. The first registration moves the library to `Ready(0)`.
    pub fn register(&mut self, frame: FrameHandle<B>) {
        log::info!("Registered frame '{}' at index {}", frame.name(), self.frames.len());
        if self.frames.is_empty() {
            self.cursor = 0;
        }
        self.frames.push(frame);
    }

    /// Removes the first registration of `frame`, keeping the cursor on the
    /// same frame where possible and always inside the library.
    pub fn remove(&mut self, frame: &FrameHandle<B>) -> Result<(), ViewError> {
        let index = self
            .frames
            .iter()
            .position(|f| Rc::ptr_eq(f, frame))
            .ok_or(ViewError::NotFound)?;

        self.frames.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        self.cursor = self.cursor.min(self.frames.len().saturating_sub(1));
        log::info!("Removed frame '{}' (cursor now {})", frame.name(), self.cursor);
        Ok(())
    }

    /// Drops every frame.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.cursor = 0;
    }

    /// Index reached by moving `delta` frames from the cursor, wrapping at both ends.
    fn next_index(&self, delta: isize) -> Result<usize, ViewError> {
        let len = self.frames.len();
        if len == 0 {
            return Err(ViewError::NoFrames);
        }

        let bound = len as isize;
        if !(-bound..=bound).contains(&delta) {
            return Err(ViewError::OutOfRange { delta, len });
        }

        let cursor = self.cursor.min(len - 1) as isize;
        Ok((cursor + delta).rem_euclid(bound) as usize)
    }

    /// Moves the cursor by `delta` frames without loading anything.
    pub fn advance(&mut self, delta: isize) -> Result<usize, ViewError> {
        let next = self.next_index(delta)?;
        self.cursor = next;
        Ok(next)
    }
}

impl<B: PhysicsBackend> FrameLibrary<B> {
    /// Resets the world and loads the frame `delta` steps from the cursor.
    ///
    /// The request is validated before the world is cleared, so a rejected
    /// delta leaves both the cursor and the backend untouched.
    pub fn activate(&mut self, delta: isize, backend: &mut B) -> Result<usize, ViewError> {
        let next = self.next_index(delta)?;

        backend.clear_all_bodies();
        backend.clear_all_joints();

        self.cursor = next;
        let frame = Rc::clone(&self.frames[next]);
        log::debug!("Loading frame '{}' ({}/{})", frame.name(), next + 1, self.frames.len());
        frame.load(backend);
        Ok(next)
    }

    /// Loads the frame at an absolute index.
    pub fn jump_to(&mut self, index: usize, backend: &mut B) -> Result<usize, ViewError> {
        let delta = index as isize - self.cursor as isize;
        if index >= self.frames.len() {
            return Err(ViewError::OutOfRange {
                delta,
                len: self.frames.len(),
            });
        }
        self.activate(delta, backend)
    }

    /// Loads the current frame and lets the backend finalize it.
    pub fn initialize(&mut self, backend: &mut B) -> Result<usize, ViewError> {
        let index = self.activate(0, backend)?;
        backend.init_data();
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl PhysicsBackend for Log {
        fn step_velocity(&mut self, _dt: f64) {}
        fn step_position(&mut self, _dt: f64) {}
        fn clear_all_bodies(&mut self) {
            self.0.push("clear_bodies".into());
        }
        fn clear_all_joints(&mut self) {
            self.0.push("clear_joints".into());
        }
        fn init_data(&mut self) {
            self.0.push("init".into());
        }
    }

    struct Named(&'static str);

    impl Frame<Log> for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn load(&self, backend: &mut Log) {
            backend.0.push(format!("load:{}", self.0));
        }
    }

    fn library(names: &[&'static str]) -> (FrameLibrary<Log>, Vec<FrameHandle<Log>>) {
        let mut lib = FrameLibrary::new();
        let handles: Vec<FrameHandle<Log>> = names
            .iter()
            .map(|&n| Rc::new(Named(n)) as FrameHandle<Log>)
            .collect();
        for h in &handles {
            lib.register(Rc::clone(h));
        }
        (lib, handles)
    }

    #[test]
    fn first_registration_makes_library_ready() {
        let (mut lib, _) = library(&[]);
        assert_eq!(lib.state(), PlaybackState::Empty);
        lib.register(Rc::new(Named("a")));
        assert_eq!(lib.state(), PlaybackState::Ready(0));
    }

    #[test]
    fn advance_wraps_in_both_directions() {
        let (mut lib, _) = library(&["a", "b", "c", "d", "e"]);
        assert_eq!(lib.advance(-1), Ok(4));
        assert_eq!(lib.advance(1), Ok(0));
        assert_eq!(lib.advance(5), Ok(0));
        assert_eq!(lib.advance(-5), Ok(0));
        assert_eq!(lib.advance(3), Ok(3));
        assert_eq!(lib.advance(-4), Ok(4));
    }

    #[test]
    fn advance_rejects_jumps_past_length() {
        let (mut lib, _) = library(&["a", "b", "c", "d", "e"]);
        lib.advance(2).unwrap();

        assert_eq!(lib.advance(6), Err(ViewError::OutOfRange { delta: 6, len: 5 }));
        assert_eq!(lib.advance(-6), Err(ViewError::OutOfRange { delta: -6, len: 5 }));
        assert_eq!(lib.cursor(), 2);
    }

    #[test]
    fn advance_on_empty_library_fails() {
        let (mut lib, _) = library(&[]);
        assert_eq!(lib.advance(0), Err(ViewError::NoFrames));
    }

    #[test]
    fn remove_keeps_cursor_valid() {
        let (mut lib, handles) = library(&["a", "b", "c"]);
        lib.advance(2).unwrap();

        lib.remove(&handles[0]).unwrap();
        assert_eq!(lib.cursor(), 1);
        assert_eq!(lib.current().map(|f| f.name()), Some("c"));

        lib.remove(&handles[2]).unwrap();
        assert_eq!(lib.cursor(), 0);
        assert_eq!(lib.current().map(|f| f.name()), Some("b"));

        lib.remove(&handles[1]).unwrap();
        assert_eq!(lib.state(), PlaybackState::Empty);
    }

    #[test]
    fn remove_unknown_frame_is_rejected() {
        let (mut lib, _) = library(&["a", "b"]);
        lib.advance(1).unwrap();

        // Same contents, different handle.
        let stranger: FrameHandle<Log> = Rc::new(Named("a"));
        assert_eq!(lib.remove(&stranger), Err(ViewError::NotFound));
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.cursor(), 1);
    }

    #[test]
    fn activate_clears_then_loads() {
        let (mut lib, _) = library(&["a", "b", "c"]);
        let mut backend = Log::default();

        assert_eq!(lib.initialize(&mut backend), Ok(0));
        assert_eq!(backend.0, ["clear_bodies", "clear_joints", "load:a", "init"]);

        backend.0.clear();
        assert_eq!(lib.activate(-1, &mut backend), Ok(2));
        assert_eq!(backend.0, ["clear_bodies", "clear_joints", "load:c"]);
    }

    #[test]
    fn rejected_activation_leaves_world_alone() {
        let (mut lib, _) = library(&["a", "b"]);
        let mut backend = Log::default();

        assert!(lib.activate(3, &mut backend).is_err());
        assert!(backend.0.is_empty());
        assert_eq!(lib.cursor(), 0);
    }

    #[test]
    fn jump_to_absolute_index() {
        let (mut lib, _) = library(&["a", "b", "c", "d"]);
        let mut backend = Log::default();

        assert_eq!(lib.jump_to(3, &mut backend), Ok(3));
        assert_eq!(lib.jump_to(1, &mut backend), Ok(1));
        assert!(lib.jump_to(4, &mut backend).is_err());
        assert_eq!(backend.0.last().map(String::as_str), Some("load:b"));
    }
}
