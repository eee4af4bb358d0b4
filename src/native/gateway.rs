//! Typed calls into [`NativeDhcpApi`].
//!
//! Each function converts its arguments to the native form, makes one call,
//! and turns the result code into a [`Result`]. On success the returned
//! memory is wrapped in a [`NativeBuffer`] before anything else happens.
//! These are administrative queries and are never retried here.

use std::ptr;

use tracing::debug;

use super::NativeDhcpApi;
use super::buffer::NativeBuffer;
use super::structs::DhcpBindElementArray;
use crate::address::DhcpIpAddress;
use crate::error::{ERROR_SUCCESS, Error, Result};

/// Encodes a server address the way the API expects it: a dotted-quad,
/// NUL-terminated UTF-16 string.
fn server_ip_address(server: DhcpIpAddress) -> Vec<u16> {
    server
        .to_string()
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect()
}

fn check(operation: &'static str, code: u32) -> Result<()> {
    if code == ERROR_SUCCESS {
        Ok(())
    } else {
        debug!("{} returned native code {}", operation, code);
        Err(Error::NativeCall { operation, code })
    }
}

/// Calls `DhcpGetServerBindingInfo` for `server`.
///
/// Returns `None` when the call succeeds without returning a buffer.
pub fn get_server_binding_info(
    api: &dyn NativeDhcpApi,
    server: DhcpIpAddress,
) -> Result<Option<NativeBuffer<'_, DhcpBindElementArray>>> {
    const OPERATION: &str = "DhcpGetServerBindingInfo";

    let server_ip_address = server_ip_address(server);
    let mut bind_elements_info: *mut DhcpBindElementArray = ptr::null_mut();

    debug!("Calling {} for {}", OPERATION, server);
    // SAFETY: the address string is NUL-terminated and outlives the call;
    // the out-pointer is a valid local.
    let code = unsafe {
        api.get_server_binding_info(server_ip_address.as_ptr(), 0, &mut bind_elements_info)
    };
    check(OPERATION, code)?;

    // SAFETY: on success the API hands ownership of the allocation to us.
    Ok(unsafe { NativeBuffer::from_raw(api, bind_elements_info) })
}
