/*!
Owned GPU handles.

The [`gpu::Gpu`](crate::gpu::Gpu) API hands out plain integer names that have to
be released by hand. [`Owned`] ties such a name to the call that releases it, so
the release happens exactly once: when the `Owned` is dropped, or when it is
overwritten by assignment.

`Owned` is move-only. Moving it transfers the obligation to release; the
moved-from binding can't be used or dropped again, so it can't release twice.
*/

use std::fmt;

pub struct Owned<H: Copy> {
    raw: H,
    release: Option<Box<dyn FnOnce(H)>>,
}

impl<H: Copy> Owned<H> {
    pub fn new(raw: H, release: impl FnOnce(H) + 'static) -> Self {
        Self {
            raw,
            release: Some(Box::new(release)),
        }
    }

    /// The raw handle, for passing to API calls. The `Owned` keeps ownership.
    pub fn raw(&self) -> H {
        self.raw
    }

    /// Give up ownership without releasing. The caller becomes responsible for the handle.
    pub fn into_raw(mut self) -> H {
        self.release = None;
        self.raw
    }
}

impl<H: Copy> Drop for Owned<H> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.raw)
        }
    }
}

impl<H: Copy + fmt::Debug> fmt::Debug for Owned<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owned")
            .field("raw", &self.raw)
            .field("released", &self.release.is_none())
            .finish()
    }
}
