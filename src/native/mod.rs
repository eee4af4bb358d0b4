//! The foreign-function boundary to `dhcpsapi.dll`.
//!
//! Everything that touches raw pointers lives under this module:
//!
//! - [`library`] - loading the module and resolving exports
//! - [`dhcpsapi`] - the production [`NativeDhcpApi`] backed by the real DLL
//! - [`gateway`] - typed calls translating result codes into [`Result`](crate::Result)
//! - [`buffer`] - the single owner of every native allocation
//! - [`marshal`] - reading fixed-layout structures out of native memory
//! - [`structs`] - `#[repr(C)]` mirrors of the native declarations
//!
//! # Ownership
//!
//! A successful native call hands the caller a tree of allocations made by
//! the RPC allocator. That tree is wrapped in a [`NativeBuffer`] immediately
//! and is returned to [`NativeDhcpApi::rpc_free_memory`] exactly once, when
//! the buffer drops.

use std::ffi::c_void;

pub mod buffer;
pub mod dhcpsapi;
pub mod gateway;
pub mod library;
pub mod marshal;
pub mod structs;

pub use buffer::{NativeBuffer, NativeLayout};
pub use dhcpsapi::DhcpsApi;
pub use library::{EntryPoint, NativeModule};
pub use structs::{DHCP_ENDPOINT_FLAG_CANT_MODIFY, DhcpBindElement, DhcpBindElementArray};

/// The native entry points this crate calls.
///
/// [`DhcpsApi`] forwards to the real DLL. Other implementations stand in
/// for the service, for example in tests.
///
/// # Safety
///
/// Methods mirror the C signatures in `dhcpsapi.h` and share their
/// contracts. Memory written to an out-pointer on success must be freeable
/// through [`rpc_free_memory`](Self::rpc_free_memory) on the same
/// implementation, one call per nested allocation.
pub trait NativeDhcpApi: Send + Sync {
    /// `DhcpGetServerBindingInfo`.
    ///
    /// # Safety
    ///
    /// `server_ip_address` must be a NUL-terminated UTF-16 string and
    /// `bind_elements_info` must be valid for a pointer-sized write.
    unsafe fn get_server_binding_info(
        &self,
        server_ip_address: *const u16,
        flags: u32,
        bind_elements_info: *mut *mut DhcpBindElementArray,
    ) -> u32;

    /// `DhcpRpcFreeMemory`.
    ///
    /// # Safety
    ///
    /// `buffer` must have been allocated by this API and not freed yet.
    unsafe fn rpc_free_memory(&self, buffer: *mut c_void);
}
