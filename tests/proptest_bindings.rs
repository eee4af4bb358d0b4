mod common;

use std::sync::Arc;

use proptest::prelude::*;

use dhcpmgmt::{DhcpIpAddress, DhcpServer};

use common::{FakeBinding, FakeDhcpApi};

fn arb_binding() -> impl Strategy<Value = FakeBinding> {
    (
        any::<u32>(),
        any::<bool>(),
        any::<u32>(),
        any::<u32>(),
        prop::option::of("[a-zA-Z0-9 ()#-]{0,40}"),
        prop::collection::vec(any::<u8>(), 0..32),
    )
        .prop_map(|(flags, bound, address, mask, description, interface_id)| FakeBinding {
            flags,
            bound,
            address,
            mask,
            description,
            interface_id,
        })
}

fn test_server(api: &Arc<FakeDhcpApi>) -> DhcpServer {
    DhcpServer::new(api.clone(), DhcpIpAddress::from_native(0x7F00_0001))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn projection_preserves_every_field(bindings in prop::collection::vec(arb_binding(), 0..16)) {
        let api = Arc::new(FakeDhcpApi::with_bindings(bindings.clone()));
        let server = test_server(&api);

        let projected: Vec<_> = server.bindings().unwrap().collect();
        prop_assert_eq!(projected.len(), bindings.len());

        for (binding, expected) in projected.iter().zip(&bindings) {
            prop_assert_eq!(binding.adapter_primary_ip_address().native(), expected.address);
            prop_assert_eq!(
                binding.adapter_primary_ip_address().to_native_bytes(),
                expected.address.to_ne_bytes()
            );
            prop_assert_eq!(
                binding.adapter_subnet_address().to_native_bytes(),
                expected.mask.to_ne_bytes()
            );
            prop_assert_eq!(binding.cant_modify(), expected.flags & 0x1 == 0x1);
            prop_assert_eq!(binding.is_bound(), expected.bound);
            prop_assert_eq!(binding.interface_description(), expected.description.as_deref());
            prop_assert_eq!(&*binding.interface_id(), &expected.interface_id[..]);
            if expected.interface_id.len() != 16 {
                prop_assert!(binding.interface_guid_id().is_nil());
            }
        }

        prop_assert_eq!(api.live_allocations(), 0);
        prop_assert_eq!(api.frees(), api.allocations());
    }

    #[test]
    fn partial_iteration_never_leaks(
        bindings in prop::collection::vec(arb_binding(), 0..16),
        take in 0usize..20
    ) {
        let api = Arc::new(FakeDhcpApi::with_bindings(bindings.clone()));
        let server = test_server(&api);

        let taken = server.bindings().unwrap().take(take).count();
        prop_assert_eq!(taken, take.min(bindings.len()));
        prop_assert_eq!(api.live_allocations(), 0);
        prop_assert_eq!(api.frees(), api.allocations());
    }
}
