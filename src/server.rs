use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::address::DhcpIpAddress;
use crate::binding::Bindings;
use crate::config::Config;
use crate::error::Result;
use crate::native::{DhcpsApi, NativeDhcpApi, gateway};

/// A DHCP server reachable through the management API.
///
/// Cheap to share across threads; every query issues its own native call
/// and owns its own result buffer.
pub struct DhcpServer {
    api: Arc<dyn NativeDhcpApi>,
    address: DhcpIpAddress,
}

impl DhcpServer {
    pub fn new(api: Arc<dyn NativeDhcpApi>, address: DhcpIpAddress) -> Self {
        Self { api, address }
    }

    /// Loads the configured module and targets the configured server.
    ///
    /// Load the module once per process; to query several servers, share
    /// one [`DhcpsApi`] through [`DhcpServer::new`] instead.
    pub fn connect(config: &Config) -> Result<Self> {
        let api = DhcpsApi::load_from(&config.module_name)?;
        info!(
            "Loaded {} for DHCP server {}",
            api.module_name(),
            config.server_ip
        );
        Ok(Self::new(Arc::new(api), config.server_ip.into()))
    }

    /// The address passed to every native call.
    pub fn address(&self) -> DhcpIpAddress {
        self.address
    }

    /// Enumerates the server's interface bindings, in native order.
    ///
    /// The native call happens here; a failure is returned before any
    /// binding is produced. The returned iterator frees the native buffer
    /// when dropped, whether or not it was fully consumed.
    pub fn bindings(&self) -> Result<Bindings<'_>> {
        let buffer = gateway::get_server_binding_info(&*self.api, self.address)?;
        let bindings = Bindings::new(self, buffer);
        debug!("Server {} reported {} binding(s)", self.address, bindings.len());
        Ok(bindings)
    }
}

impl fmt::Debug for DhcpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhcpServer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
