use crate::error::{Error, Result};

/// Destination for a packed buffer, typically memory owned by a foreign
/// caller.
///
/// A sink offers two ways in: a direct mutable view that the packer fills in
/// place, or a single bulk copy of an already packed buffer. Sinks whose
/// direct access is expensive to hold (a pinned managed array, say) may
/// decline it by returning `None` from [`direct`](Self::direct).
pub trait WireSink {
    /// Exposes exactly `len` writable floats, or `None` to force a copy.
    fn direct(&mut self, len: usize) -> Option<&mut [f32]>;

    /// Replaces the sink's contents with `data` in one region write.
    fn copy_from(&mut self, data: &[f32]) -> Result<()>;
}

impl WireSink for Vec<f32> {
    fn direct(&mut self, len: usize) -> Option<&mut [f32]> {
        self.clear();
        self.resize(len, 0.0);
        Some(self.as_mut_slice())
    }

    fn copy_from(&mut self, data: &[f32]) -> Result<()> {
        self.clear();
        self.extend_from_slice(data);
        Ok(())
    }
}

/// Fixed caller memory; the packed buffer occupies its prefix.
impl WireSink for [f32] {
    fn direct(&mut self, len: usize) -> Option<&mut [f32]> {
        self.get_mut(..len)
    }

    fn copy_from(&mut self, data: &[f32]) -> Result<()> {
        let available = self.len();
        let dst = self
            .get_mut(..data.len())
            .ok_or(Error::BufferTooSmall {
                needed: data.len(),
                available,
            })?;
        dst.copy_from_slice(data);
        Ok(())
    }
}
