//! Scripted random sources for deterministic tests

use rand::RngCore;

/// Returns the same word forever. All-zero bits make every `f32` draw 0.0,
/// all-one bits push it just under 1.0.
pub struct FixedRng(u32);

impl FixedRng {
    /// Every probability roll succeeds
    pub fn low() -> Self {
        Self(0)
    }

    /// Every probability roll below 1.0 fails
    pub fn high() -> Self {
        Self(u32::MAX)
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.0) << 32) | u64::from(self.0)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(self.0 as u8);
    }
}
