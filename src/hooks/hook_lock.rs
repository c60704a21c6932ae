#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

#[repr(transparent)]
pub(crate) struct HookLock<T: 'static + Copy + Send + Sync>(impl_::RwLock<Option<T>>);

impl<T: 'static + Copy + Send + Sync> HookLock<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    #[inline]
    pub(crate) fn get(&'static self) -> Option<T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().expect("Unable to acquire hook lock");

        *guard
    }

    #[inline]
    pub(crate) fn replace(&'static self, value: T) -> Option<T> {
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        #[cfg(feature = "std")]
        let mut guard = self.0.write().expect("Unable to acquire hook lock");

        guard.replace(value)
    }

    #[inline]
    pub(crate) fn take(&'static self) -> Option<T> {
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        #[cfg(feature = "std")]
        let mut guard = self.0.write().expect("Unable to acquire hook lock");

        guard.take()
    }
}
