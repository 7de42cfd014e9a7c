/// Identifies one submission. A settled request is applied only while its
/// token is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic counter advanced by every reset and every staged-input change.
#[derive(Debug, Default)]
pub(crate) struct Generation(u64);

impl Generation {
    pub(crate) fn current(&self) -> RequestToken {
        RequestToken(self.0)
    }

    /// Invalidate every outstanding token.
    pub(crate) fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    pub(crate) fn is_current(&self, token: RequestToken) -> bool {
        self.0 == token.0
    }
}
