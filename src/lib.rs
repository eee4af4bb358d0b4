//! # dhcpmgmt
//!
//! Typed access to the Windows DHCP Server Management API (`dhcpsapi.dll`).
//!
//! ## Features
//!
//! - Runtime loading of the management module; nothing links against it
//! - Native result codes surfaced verbatim through [`Error::NativeCall`]
//! - Native buffers owned by a single handle and freed exactly once
//! - Lazy binding enumeration that frees its buffer even when abandoned
//! - Pluggable native layer through [`NativeDhcpApi`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use dhcpmgmt::{Config, DhcpServer};
//!
//! fn main() -> dhcpmgmt::Result<()> {
//!     let config = Config::load_or_create("config.json")?;
//!     let server = DhcpServer::connect(&config)?;
//!     for binding in server.bindings()? {
//!         println!(
//!             "{} {}/{}",
//!             binding.interface_description().unwrap_or("-"),
//!             binding.adapter_primary_ip_address(),
//!             binding.adapter_subnet_address().significant_bits(),
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`DhcpServer`] - A server handle; entry point for queries
//! - [`DhcpServerBindingElement`] - One interface binding, detached from native memory
//! - [`Bindings`] - Iterator owning the native buffer of one query
//! - [`DhcpIpAddress`] / [`DhcpIpMask`] - Addresses in the API's native integer form
//! - [`native`] - Module loading, buffer ownership and structure marshaling

pub mod address;
pub mod binding;
pub mod config;
pub mod error;
pub mod helpers;
pub mod native;
pub mod server;

pub use address::{DhcpIpAddress, DhcpIpMask};
pub use binding::{Bindings, DhcpServerBindingElement};
pub use config::Config;
pub use error::{ERROR_SUCCESS, Error, Result};
pub use native::{DhcpsApi, NativeDhcpApi};
pub use server::DhcpServer;
