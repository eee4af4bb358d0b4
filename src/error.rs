//! Error types for the DHCP management bindings.
//!
//! All fallible operations in this crate return [`Result<T>`], which uses
//! the [`Error`] enum for error variants.

/// Result code returned by every native entry point on success.
pub const ERROR_SUCCESS: u32 = 0;

/// Errors that can occur while talking to the native DHCP management API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File system I/O error (configuration file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (configuration file).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The native module could not be found or loaded.
    ///
    /// `code` carries the platform error code (`GetLastError` on Windows)
    /// when the platform reports one.
    #[error("Failed to load native module {module} (code {code:?}): {source}")]
    ModuleLoad {
        module: String,
        code: Option<i32>,
        #[source]
        source: libloading::Error,
    },

    /// The platform refused to unload a native module.
    #[error("Failed to release native module {module}: {source}")]
    ModuleRelease {
        module: String,
        #[source]
        source: libloading::Error,
    },

    /// A named entry point is not exported by a loaded module.
    #[error("Symbol {symbol} not found in {module}: {source}")]
    SymbolResolution {
        module: String,
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    /// A native call returned something other than [`ERROR_SUCCESS`].
    ///
    /// The code is kept verbatim so callers can classify it themselves;
    /// this crate never retries.
    #[error("{operation} failed with native code {code} ({})", describe_native_code(.code))]
    NativeCall { operation: &'static str, code: u32 },

    /// A textual IPv4 address or mask could not be parsed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid configuration.
    ///
    /// Returned by [`Config::validate`](crate::Config::validate).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns the raw native result code for [`Error::NativeCall`].
    pub fn native_code(&self) -> Option<u32> {
        match self {
            Self::NativeCall { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Human-readable text for result codes commonly returned by `dhcpsapi`.
///
/// Display only; no behavior in this crate depends on a specific code.
fn describe_native_code(code: &u32) -> &'static str {
    match *code {
        5 => "access denied",
        50 => "request not supported",
        87 => "invalid parameter",
        1702 => "invalid RPC binding",
        1722 => "RPC server unavailable",
        1753 => "no RPC endpoint registered",
        20000 => "DHCP registry initialization failed",
        20001 => "DHCP database initialization failed",
        20002 => "DHCP RPC initialization failed",
        20003 => "DHCP network initialization failed",
        20004 => "DHCP subnet already exists",
        20005 => "DHCP subnet not present",
        _ => "unrecognized code",
    }
}

/// A specialized Result type for DHCP management operations.
pub type Result<T> = std::result::Result<T, Error>;
