//! Concatenation of paths

use super::Path;
use crate::common::types::{Frame, Twist};

/// Several paths traversed one after another
#[derive(Debug, Default)]
pub struct PathComposite {
    paths: Vec<Box<dyn Path>>,
    // cumulative path length at the end of each element
    ends: Vec<f64>,
    path_length: f64,
}

impl PathComposite {
    /// Create an empty composite
    pub fn new() -> Self {
        PathComposite::default()
    }

    /// Append a path
    pub fn add(&mut self, path: Box<dyn Path>) {
        self.path_length += path.path_length();
        self.ends.push(self.path_length);
        self.paths.push(path);
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Element containing `s` and the parameter local to it
    fn lookup(&self, s: f64) -> Option<(&dyn Path, f64)> {
        let last = self.paths.len().checked_sub(1)?;
        let mut previous = 0.0;
        for (i, end) in self.ends.iter().enumerate() {
            if s <= *end || i == last {
                return Some((self.paths[i].as_ref(), s - previous));
            }
            previous = *end;
        }
        None
    }
}

impl Path for PathComposite {
    fn path_length(&self) -> f64 {
        self.path_length
    }

    fn length_to_s(&self, length: f64) -> f64 {
        length
    }

    fn pos(&self, s: f64) -> Frame {
        match self.lookup(s) {
            Some((path, local)) => path.pos(local),
            None => Frame::identity(),
        }
    }

    fn vel(&self, s: f64, sd: f64) -> Twist {
        match self.lookup(s) {
            Some((path, local)) => path.vel(local, sd),
            None => Twist::zero(),
        }
    }
}
