//! Reads fixed-layout native structures and the data they point to.
//!
//! Every function here copies out of native memory; nothing returned keeps
//! a pointer into it.

use std::slice;

use tracing::warn;
use uuid::Uuid;

use super::structs::GUID_SIZE;

/// A native structure describing a contiguous run of elements it does not
/// own: an element count plus a pointer to the first element.
pub trait ArrayEnvelope {
    type Element: Copy;

    /// The declared element count. Authoritative; never read past it.
    fn count(&self) -> usize;

    fn elements(&self) -> *const Self::Element;
}

/// Returns the `count` elements an envelope describes.
///
/// A zero count never dereferences the element pointer. A null element
/// pointer with a non-zero count violates the native contract and is read
/// as empty.
///
/// # Safety
///
/// When the count is non-zero, the element pointer must address that many
/// initialized elements that stay alive for the returned borrow.
pub unsafe fn read_envelope<E: ArrayEnvelope>(envelope: &E) -> &[E::Element] {
    let count = envelope.count();
    if count == 0 {
        return &[];
    }

    let elements = envelope.elements();
    if elements.is_null() {
        warn!("Native array declares {} elements but no element pointer", count);
        return &[];
    }

    // SAFETY: upheld by the caller.
    unsafe { slice::from_raw_parts(elements, count) }
}

/// Copies the element at `index` out of an envelope by value.
///
/// # Safety
///
/// Same contract as [`read_envelope`].
pub unsafe fn element_at<E: ArrayEnvelope>(envelope: &E, index: usize) -> Option<E::Element> {
    unsafe { read_envelope(envelope) }.get(index).copied()
}

/// Decodes a NUL-terminated UTF-16 string, replacing invalid sequences.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated UTF-16 string.
pub unsafe fn read_wide_string(ptr: *const u16) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    let mut len = 0;
    // SAFETY: the terminator bounds the walk.
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }

    let units = unsafe { slice::from_raw_parts(ptr, len) };
    Some(String::from_utf16_lossy(units))
}

/// Copies `len` bytes. A null pointer or zero length yields an empty vector.
///
/// # Safety
///
/// `ptr` must be null or valid for `len` bytes.
pub unsafe fn read_bytes(ptr: *const u8, len: usize) -> Vec<u8> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }

    unsafe { slice::from_raw_parts(ptr, len) }.to_vec()
}

/// Reads a `GUID` in its native in-memory layout (little-endian `Data1`,
/// `Data2` and `Data3`).
///
/// # Safety
///
/// `ptr` must be valid for 16 bytes.
pub unsafe fn read_guid(ptr: *const u8) -> Uuid {
    let mut bytes = [0u8; GUID_SIZE];
    // SAFETY: upheld by the caller.
    bytes.copy_from_slice(unsafe { slice::from_raw_parts(ptr, GUID_SIZE) });
    Uuid::from_bytes_le(bytes)
}
