use crate::Animation;

/// Ordered list of programs with a current selection.
pub struct Playlist {
    programs: Vec<Box<dyn Animation>>,
    current: usize,
}

impl Playlist {
    pub fn new(programs: Vec<Box<dyn Animation>>) -> Self {
        Self {
            programs,
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&dyn Animation> {
        self.programs.get(self.current).map(|p| p.as_ref())
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Animation + 'static)> {
        self.programs.get_mut(self.current).map(|p| p.as_mut())
    }

    /// Move to the next program, wrapping at the end. Returns the new index.
    pub fn next(&mut self) -> usize {
        if !self.programs.is_empty() {
            self.current = (self.current + 1) % self.programs.len();
        }
        self.current
    }

    /// Jump to `index`. Returns false and keeps the selection when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.programs.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Back to the first program.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.programs.iter().map(|p| p.name())
    }
}
