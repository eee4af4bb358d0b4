//! A fake `dhcpsapi` that allocates like the RPC runtime and counts frees.

#![allow(dead_code)]

use std::alloc::{Layout, alloc, dealloc};
use std::collections::HashMap;
use std::ffi::c_void;
use std::net::Ipv4Addr;
use std::ptr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use dhcpmgmt::native::{DhcpBindElement, DhcpBindElementArray};
use dhcpmgmt::{ERROR_SUCCESS, NativeDhcpApi};

/// A binding as the fake service reports it.
#[derive(Debug, Clone, Default)]
pub struct FakeBinding {
    pub flags: u32,
    pub bound: bool,
    pub address: u32,
    pub mask: u32,
    pub description: Option<String>,
    pub interface_id: Vec<u8>,
}

impl FakeBinding {
    pub fn new(description: &str, address: Ipv4Addr, mask: Ipv4Addr) -> Self {
        Self {
            flags: 0,
            bound: true,
            address: u32::from(address),
            mask: u32::from(mask),
            description: Some(description.to_string()),
            interface_id: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeDhcpApi {
    bindings: Vec<FakeBinding>,
    result_code: u32,
    /// Reported element count that comes with a null element pointer.
    declared_count: Option<u32>,
    live: Mutex<HashMap<usize, Layout>>,
    calls: Mutex<Vec<String>>,
    allocations: AtomicUsize,
    frees: AtomicUsize,
}

impl FakeDhcpApi {
    pub fn with_bindings(bindings: Vec<FakeBinding>) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn failing(result_code: u32) -> Self {
        Self {
            result_code,
            ..Default::default()
        }
    }

    /// Reports `count` elements but hands back no element array.
    pub fn with_declared_count(count: u32) -> Self {
        Self {
            declared_count: Some(count),
            ..Default::default()
        }
    }

    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub fn frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }

    pub fn live_allocations(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    /// Server addresses received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn allocate<T: Copy>(&self, values: &[T]) -> *mut T {
        assert!(!values.is_empty(), "the RPC allocator never returns empty blocks");
        let layout = Layout::array::<T>(values.len()).unwrap();
        let ptr = unsafe { alloc(layout) }.cast::<T>();
        assert!(!ptr.is_null());
        unsafe { ptr::copy_nonoverlapping(values.as_ptr(), ptr, values.len()) };

        self.live.lock().unwrap().insert(ptr as usize, layout);
        self.allocations.fetch_add(1, Ordering::SeqCst);
        ptr
    }

    fn allocate_element(&self, binding: &FakeBinding) -> DhcpBindElement {
        let if_description = match &binding.description {
            Some(text) => {
                let units: Vec<u16> = text.encode_utf16().chain([0]).collect();
                self.allocate(&units)
            }
            None => ptr::null_mut(),
        };
        let if_id = if binding.interface_id.is_empty() {
            ptr::null_mut()
        } else {
            self.allocate(&binding.interface_id)
        };

        DhcpBindElement {
            flags: binding.flags,
            bound_to_dhcp_server: i32::from(binding.bound),
            adapter_primary_address: binding.address,
            adapter_subnet_address: binding.mask,
            if_description,
            if_id_size: binding.interface_id.len() as u32,
            if_id,
        }
    }
}

impl NativeDhcpApi for FakeDhcpApi {
    unsafe fn get_server_binding_info(
        &self,
        server_ip_address: *const u16,
        _flags: u32,
        bind_elements_info: *mut *mut DhcpBindElementArray,
    ) -> u32 {
        let mut len = 0;
        while unsafe { *server_ip_address.add(len) } != 0 {
            len += 1;
        }
        let units = unsafe { std::slice::from_raw_parts(server_ip_address, len) };
        self.calls.lock().unwrap().push(String::from_utf16_lossy(units));

        if self.result_code != ERROR_SUCCESS {
            return self.result_code;
        }

        if let Some(num_elements) = self.declared_count {
            let array = self.allocate(&[DhcpBindElementArray {
                num_elements,
                elements: ptr::null_mut(),
            }]);
            unsafe { *bind_elements_info = array };
            return ERROR_SUCCESS;
        }

        let elements: Vec<DhcpBindElement> = self
            .bindings
            .iter()
            .map(|binding| self.allocate_element(binding))
            .collect();
        let elements_ptr = if elements.is_empty() {
            ptr::null_mut()
        } else {
            self.allocate(&elements)
        };

        let array = self.allocate(&[DhcpBindElementArray {
            num_elements: elements.len() as u32,
            elements: elements_ptr,
        }]);
        unsafe { *bind_elements_info = array };
        ERROR_SUCCESS
    }

    unsafe fn rpc_free_memory(&self, buffer: *mut c_void) {
        let layout = self
            .live
            .lock()
            .unwrap()
            .remove(&(buffer as usize))
            .expect("freed a pointer that is not live");
        unsafe { dealloc(buffer.cast(), layout) };
        self.frees.fetch_add(1, Ordering::SeqCst);
    }
}
