//! `#[repr(C)]` mirrors of the structures declared in `dhcpsapi.h`.
//!
//! Field order, width and alignment must match the C declarations exactly;
//! the layout tests below pin the 64-bit offsets.

use std::ffi::c_void;
use std::ptr;

use super::NativeDhcpApi;
use super::buffer::NativeLayout;
use super::marshal::{self, ArrayEnvelope};

/// `DHCP_ENDPOINT_FLAG_CANT_MODIFY`: the binding is read-only.
pub const DHCP_ENDPOINT_FLAG_CANT_MODIFY: u32 = 0x01;

/// Size of a `GUID` in bytes.
pub const GUID_SIZE: usize = 16;

/// `DHCP_BIND_ELEMENT`.
///
/// ```c
/// typedef struct _DHCP_BIND_ELEMENT {
///     ULONG           Flags;
///     BOOL            fBoundToDHCPServer;
///     DHCP_IP_ADDRESS AdapterPrimaryAddress;
///     DHCP_IP_ADDRESS AdapterSubnetAddress;
///     LPWSTR          IfDescription;
///     ULONG           IfIdSize;
///     LPBYTE          IfId;
/// } DHCP_BIND_ELEMENT;
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DhcpBindElement {
    pub flags: u32,
    pub bound_to_dhcp_server: i32,
    pub adapter_primary_address: u32,
    pub adapter_subnet_address: u32,
    pub if_description: *mut u16,
    pub if_id_size: u32,
    pub if_id: *mut u8,
}

impl DhcpBindElement {
    /// The interface identifier discriminator.
    ///
    /// The API reports adapter GUIDs as a 16-byte `IfId`; any other size
    /// is an opaque identifier.
    pub fn if_id_is_guid(&self) -> bool {
        self.if_id_size as usize == GUID_SIZE && !self.if_id.is_null()
    }
}

impl Default for DhcpBindElement {
    fn default() -> Self {
        Self {
            flags: 0,
            bound_to_dhcp_server: 0,
            adapter_primary_address: 0,
            adapter_subnet_address: 0,
            if_description: ptr::null_mut(),
            if_id_size: 0,
            if_id: ptr::null_mut(),
        }
    }
}

/// `DHCP_BIND_ELEMENT_ARRAY`.
///
/// ```c
/// typedef struct _DHCP_BIND_ELEMENT_ARRAY {
///     DWORD               NumElements;
///     LPDHCP_BIND_ELEMENT Elements;
/// } DHCP_BIND_ELEMENT_ARRAY;
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DhcpBindElementArray {
    pub num_elements: u32,
    pub elements: *mut DhcpBindElement,
}

impl ArrayEnvelope for DhcpBindElementArray {
    type Element = DhcpBindElement;

    fn count(&self) -> usize {
        self.num_elements as usize
    }

    fn elements(&self) -> *const DhcpBindElement {
        self.elements
    }
}

unsafe impl NativeLayout for DhcpBindElementArray {
    unsafe fn release_nested(&self, api: &dyn NativeDhcpApi) {
        // SAFETY: the envelope is still owned by the caller's buffer.
        let elements = unsafe { marshal::read_envelope(self) };
        for element in elements {
            for nested in [element.if_description.cast::<c_void>(), element.if_id.cast()] {
                if !nested.is_null() {
                    // SAFETY: each nested pointer is a separate RPC allocation.
                    unsafe { api.rpc_free_memory(nested) };
                }
            }
        }

        if !self.elements.is_null() {
            // SAFETY: the element array is its own allocation.
            unsafe { api.rpc_free_memory(self.elements.cast()) };
        }
    }
}
