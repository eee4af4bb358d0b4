//! Single-owner handle for memory allocated by the native API.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::trace;

use super::NativeDhcpApi;

/// A native structure that can be overlaid on a [`NativeBuffer`].
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` and match the native declaration
/// exactly, and [`release_nested`](Self::release_nested) must free every
/// nested allocation the native call makes for that structure, once each.
pub unsafe trait NativeLayout {
    /// Frees the allocations reachable from `self`, but not `self`.
    ///
    /// # Safety
    ///
    /// Called once, immediately before the root allocation is freed.
    unsafe fn release_nested(&self, _api: &dyn NativeDhcpApi) {}
}

/// Owns a native allocation and frees it exactly once on drop.
///
/// The handle is neither `Clone` nor `Send`: ownership can only move, and
/// never across threads. Views obtained through [`overlay`](Self::overlay)
/// borrow the handle, so none of them can be read after release.
pub struct NativeBuffer<'api, T: NativeLayout> {
    ptr: NonNull<T>,
    api: &'api dyn NativeDhcpApi,
    _owns: PhantomData<T>,
}

impl<'api, T: NativeLayout> NativeBuffer<'api, T> {
    /// Takes ownership of `ptr`. Returns `None` for a null pointer, in which
    /// case nothing is owned.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a valid `T` allocated by `api`, and no other
    /// owner may free it.
    pub unsafe fn from_raw(api: &'api dyn NativeDhcpApi, ptr: *mut T) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            api,
            _owns: PhantomData,
        })
    }

    /// Views the owned memory as `T`.
    pub fn overlay(&self) -> &T {
        // SAFETY: `ptr` is valid and unaliased for as long as `self` lives.
        unsafe { self.ptr.as_ref() }
    }

    /// Frees the memory now instead of at the end of the scope.
    pub fn release(self) {
        drop(self);
    }
}

impl<T: NativeLayout> Drop for NativeBuffer<'_, T> {
    fn drop(&mut self) {
        trace!("Releasing native buffer at {:p}", self.ptr);
        // SAFETY: this handle is the sole owner and `drop` runs once.
        unsafe {
            self.ptr.as_ref().release_nested(self.api);
            self.api.rpc_free_memory(self.ptr.as_ptr().cast());
        }
    }
}

impl<T: NativeLayout> fmt::Debug for NativeBuffer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("ptr", &self.ptr)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
