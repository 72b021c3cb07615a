//! Single-threaded "run on next frame" queue.
//!
//! Stands in for a host repaint scheduler: whatever is scheduled while a frame
//! runs waits for the following frame, exactly like a task re-registering
//! itself from inside an animation-frame callback.

use std::collections::VecDeque;

/// FIFO of tasks, drained one frame at a time
#[derive(Debug)]
pub struct FrameQueue<T> {
    pending: VecDeque<T>,
    frames_run: u64,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            frames_run: 0,
        }
    }
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next frame
    pub fn schedule(&mut self, task: T) {
        self.pending.push_back(task);
    }

    /// Take every task due in the frame that is starting now
    ///
    /// Tasks scheduled after this call belong to the next frame.
    pub fn begin_frame(&mut self) -> Vec<T> {
        self.frames_run += 1;
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Frames started so far
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}
