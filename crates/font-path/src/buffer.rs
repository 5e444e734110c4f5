//! Append-only command storage with an inline region.

use std::{collections::TryReserveError, fmt, ops::Deref};

use crate::PathCommand;

/// Commands held inline before the buffer spills to the heap.
///
/// Typical icon and text glyphs need between 12 and 20 commands.
pub const INLINE_CAPACITY: usize = 16;

enum Storage {
    Inline {
        commands: [PathCommand; INLINE_CAPACITY],
        len: usize,
    },
    Heap(Vec<PathCommand>),
}

/// Ordered sequence of [`PathCommand`]s.
///
/// The first [`INLINE_CAPACITY`] commands live inline. On the first overflow
/// the buffer moves to heap storage of twice that size and keeps doubling
/// from there. It never moves back inline, and [`clear`](Self::clear) keeps
/// whatever capacity was reached so a reused buffer stops allocating once it
/// has seen the largest outline.
pub struct PathCommandBuffer {
    storage: Storage,
}

impl PathCommandBuffer {
    pub const fn new() -> Self {
        Self {
            storage: Storage::Inline {
                commands: [PathCommand::Close; INLINE_CAPACITY],
                len: 0,
            },
        }
    }

    /// Appends a command, growing the storage when full.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the storage could not grow. The
    /// buffer is left unchanged in that case.
    pub fn push(&mut self, command: PathCommand) -> Result<(), TryReserveError> {
        match &mut self.storage {
            Storage::Inline { commands, len } if *len < INLINE_CAPACITY => {
                commands[*len] = command;
                *len += 1;
            }
            Storage::Inline { commands, len } => {
                let mut heap = Vec::new();
                heap.try_reserve_exact(INLINE_CAPACITY * 2)?;
                heap.extend_from_slice(&commands[..*len]);
                heap.push(command);
                self.storage = Storage::Heap(heap);
            }
            Storage::Heap(heap) => {
                if heap.len() == heap.capacity() {
                    heap.try_reserve_exact(heap.capacity().max(INLINE_CAPACITY))?;
                }
                heap.push(command);
            }
        }
        Ok(())
    }

    /// Resets the length to zero without releasing capacity.
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Inline { len, .. } => *len = 0,
            Storage::Heap(heap) => heap.clear(),
        }
    }

    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Inline { .. } => INLINE_CAPACITY,
            Storage::Heap(heap) => heap.capacity(),
        }
    }

    /// Whether the commands are still held in the inline region.
    pub fn is_inline(&self) -> bool {
        matches!(self.storage, Storage::Inline { .. })
    }

    pub fn as_slice(&self) -> &[PathCommand] {
        match &self.storage {
            Storage::Inline { commands, len } => &commands[..*len],
            Storage::Heap(heap) => heap,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [PathCommand] {
        match &mut self.storage {
            Storage::Inline { commands, len } => &mut commands[..*len],
            Storage::Heap(heap) => heap,
        }
    }
}

impl Default for PathCommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for PathCommandBuffer {
    type Target = [PathCommand];

    fn deref(&self) -> &[PathCommand] {
        self.as_slice()
    }
}

impl Clone for PathCommandBuffer {
    fn clone(&self) -> Self {
        let storage = match &self.storage {
            Storage::Inline { commands, len } => Storage::Inline {
                commands: *commands,
                len: *len,
            },
            Storage::Heap(heap) => Storage::Heap(heap.clone()),
        };
        Self { storage }
    }
}

impl PartialEq for PathCommandBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl fmt::Debug for PathCommandBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a PathCommandBuffer {
    type Item = &'a PathCommand;
    type IntoIter = std::slice::Iter<'a, PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
