//! Server interface bindings.
//!
//! A binding describes one network adapter of a DHCP server and whether the
//! service answers on it. [`DhcpServer::bindings`] returns a [`Bindings`]
//! iterator; each [`DhcpServerBindingElement`] it yields is copied out of
//! native memory and holds no pointer into it.

use std::borrow::Cow;
use std::iter::FusedIterator;

use uuid::Uuid;

use crate::address::{DhcpIpAddress, DhcpIpMask};
use crate::native::buffer::NativeBuffer;
use crate::native::marshal;
use crate::native::structs::{DHCP_ENDPOINT_FLAG_CANT_MODIFY, DhcpBindElement, DhcpBindElementArray};
use crate::server::DhcpServer;

/// Network interface identifier reported for a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InterfaceId {
    /// Adapter GUID.
    Guid(Uuid),
    /// Opaque identifier bytes, kept verbatim.
    Raw(Vec<u8>),
}

/// One interface binding of a DHCP server.
#[derive(Debug, Clone)]
pub struct DhcpServerBindingElement<'server> {
    server: &'server DhcpServer,
    cant_modify: bool,
    is_bound: bool,
    adapter_primary_ip_address: DhcpIpAddress,
    adapter_subnet_address: DhcpIpMask,
    interface_description: Option<String>,
    interface_id: InterfaceId,
}

impl<'server> DhcpServerBindingElement<'server> {
    /// Projects a native element into an owned value.
    ///
    /// # Safety
    ///
    /// The element's string and identifier pointers must be null or valid
    /// for the sizes it declares.
    pub(crate) unsafe fn from_native(
        server: &'server DhcpServer,
        native: &DhcpBindElement,
    ) -> Self {
        let interface_id = if native.if_id_is_guid() {
            InterfaceId::Guid(unsafe { marshal::read_guid(native.if_id) })
        } else {
            let len = native.if_id_size as usize;
            InterfaceId::Raw(unsafe { marshal::read_bytes(native.if_id, len) })
        };

        Self {
            server,
            cant_modify: native.flags & DHCP_ENDPOINT_FLAG_CANT_MODIFY
                == DHCP_ENDPOINT_FLAG_CANT_MODIFY,
            is_bound: native.bound_to_dhcp_server != 0,
            adapter_primary_ip_address: DhcpIpAddress::from_native(native.adapter_primary_address),
            adapter_subnet_address: DhcpIpMask::from_native(native.adapter_subnet_address),
            interface_description: unsafe { marshal::read_wide_string(native.if_description) },
            interface_id,
        }
    }

    /// The server this binding belongs to.
    pub fn server(&self) -> &'server DhcpServer {
        self.server
    }

    /// The binding cannot be modified.
    pub fn cant_modify(&self) -> bool {
        self.cant_modify
    }

    /// The DHCP service is bound to this interface.
    pub fn is_bound(&self) -> bool {
        self.is_bound
    }

    /// Address assigned to the adapter.
    pub fn adapter_primary_ip_address(&self) -> DhcpIpAddress {
        self.adapter_primary_ip_address
    }

    #[deprecated(note = "use `adapter_primary_ip_address().native()`")]
    pub fn adapter_primary_ip_address_native(&self) -> i32 {
        self.adapter_primary_ip_address.native() as i32
    }

    /// Subnet mask used by the adapter.
    pub fn adapter_subnet_address(&self) -> DhcpIpMask {
        self.adapter_subnet_address
    }

    #[deprecated(note = "use `adapter_subnet_address().native()`")]
    pub fn adapter_subnet_address_native(&self) -> i32 {
        self.adapter_subnet_address.native() as i32
    }

    /// Name of the network interface device.
    pub fn interface_description(&self) -> Option<&str> {
        self.interface_description.as_deref()
    }

    /// Adapter GUID, or the nil GUID when the interface is identified by
    /// opaque bytes.
    pub fn interface_guid_id(&self) -> Uuid {
        match &self.interface_id {
            InterfaceId::Guid(guid) => *guid,
            InterfaceId::Raw(_) => Uuid::nil(),
        }
    }

    /// Interface identifier bytes.
    ///
    /// For GUID identifiers these are the GUID's native byte layout, the
    /// same 16 bytes the API returned.
    pub fn interface_id(&self) -> Cow<'_, [u8]> {
        match &self.interface_id {
            InterfaceId::Guid(guid) => Cow::Owned(guid.to_bytes_le().to_vec()),
            InterfaceId::Raw(bytes) => Cow::Borrowed(bytes),
        }
    }
}

/// Lazily projects the bindings returned by one native call.
///
/// Owns the native buffer: it is freed once, when the iterator is dropped,
/// whether or not every element was consumed.
#[derive(Debug)]
pub struct Bindings<'server> {
    server: &'server DhcpServer,
    buffer: Option<NativeBuffer<'server, DhcpBindElementArray>>,
    index: usize,
    count: usize,
}

impl<'server> Bindings<'server> {
    pub(crate) fn new(
        server: &'server DhcpServer,
        buffer: Option<NativeBuffer<'server, DhcpBindElementArray>>,
    ) -> Self {
        // SAFETY: the buffer was produced by the binding call, which promises
        // this layout. Counting through the read path keeps `len` honest.
        let count = buffer.as_ref().map_or(0, |buffer| {
            unsafe { marshal::read_envelope(buffer.overlay()) }.len()
        });
        Self {
            server,
            buffer,
            index: 0,
            count,
        }
    }
}

impl<'server> Iterator for Bindings<'server> {
    type Item = DhcpServerBindingElement<'server>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let buffer = self.buffer.as_ref()?;

        // SAFETY: the buffer is alive and was produced by the binding call,
        // which promises this layout.
        let element = unsafe { marshal::element_at(buffer.overlay(), self.index) }?;
        self.index += 1;

        Some(unsafe { DhcpServerBindingElement::from_native(self.server, &element) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bindings<'_> {}

impl FusedIterator for Bindings<'_> {}
