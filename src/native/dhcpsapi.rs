//! [`NativeDhcpApi`] backed by the real `dhcpsapi.dll`.

use std::ffi::c_void;
use std::fmt;

use tracing::debug;

use super::NativeDhcpApi;
use super::library::NativeModule;
use super::structs::DhcpBindElementArray;
use crate::error::Result;

type DhcpGetServerBindingInfoFn =
    unsafe extern "system" fn(*const u16, u32, *mut *mut DhcpBindElementArray) -> u32;
type DhcpRpcFreeMemoryFn = unsafe extern "system" fn(*mut c_void);

/// The DHCP Server Management API, loaded once and shared.
///
/// The resolved entry points are stored next to the module that owns them,
/// so they stay valid for as long as this value exists.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use dhcpmgmt::{DhcpServer, DhcpsApi};
///
/// # fn example() -> dhcpmgmt::Result<()> {
/// let api = Arc::new(DhcpsApi::load()?);
/// let server = DhcpServer::new(api, "10.0.0.1".parse()?);
/// for binding in server.bindings()? {
///     println!("{} {}", binding.adapter_primary_ip_address(), binding.is_bound());
/// }
/// # Ok(())
/// # }
/// ```
pub struct DhcpsApi {
    get_server_binding_info: DhcpGetServerBindingInfoFn,
    rpc_free_memory: DhcpRpcFreeMemoryFn,
    module: NativeModule,
}

impl DhcpsApi {
    /// File name of the DHCP Server Management API module.
    pub const MODULE_NAME: &'static str = "dhcpsapi.dll";

    /// Loads [`MODULE_NAME`](Self::MODULE_NAME) from the system search path.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::MODULE_NAME)
    }

    /// Loads the API from a specific module name or path.
    pub fn load_from(module_name: &str) -> Result<Self> {
        let module = NativeModule::load(module_name)?;

        // SAFETY: signatures match the declarations in dhcpsapi.h.
        let get_server_binding_info = *unsafe {
            module.resolve::<DhcpGetServerBindingInfoFn>("DhcpGetServerBindingInfo")
        }?;
        let rpc_free_memory =
            *unsafe { module.resolve::<DhcpRpcFreeMemoryFn>("DhcpRpcFreeMemory") }?;

        debug!("Resolved DHCP management entry points from {}", module.name());

        Ok(Self {
            get_server_binding_info,
            rpc_free_memory,
            module,
        })
    }

    pub fn module_name(&self) -> &str {
        self.module.name()
    }

    /// Unloads the module. Fails if the platform refuses.
    pub fn release(self) -> Result<()> {
        self.module.release()
    }
}

impl NativeDhcpApi for DhcpsApi {
    unsafe fn get_server_binding_info(
        &self,
        server_ip_address: *const u16,
        flags: u32,
        bind_elements_info: *mut *mut DhcpBindElementArray,
    ) -> u32 {
        unsafe { (self.get_server_binding_info)(server_ip_address, flags, bind_elements_info) }
    }

    unsafe fn rpc_free_memory(&self, buffer: *mut c_void) {
        unsafe { (self.rpc_free_memory)(buffer) }
    }
}

impl fmt::Debug for DhcpsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhcpsApi")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}
