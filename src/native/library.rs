//! Loading native modules and resolving their exports.

use std::fmt;

use libloading::{Library, Symbol};
use tracing::debug;

use crate::error::{Error, Result};

/// A resolved export. Borrows the module, so it cannot outlive it.
pub type EntryPoint<'module, T> = Symbol<'module, T>;

/// A loaded native module.
///
/// Released exactly once: by [`release`](Self::release), which consumes the
/// module, or on drop. Loading the same name twice yields two handles to
/// one reference-counted module; each releases its own reference.
pub struct NativeModule {
    name: String,
    library: Library,
}

impl NativeModule {
    /// Loads `name` using the platform's library search order.
    pub fn load(name: &str) -> Result<Self> {
        debug!("Loading native module {}", name);

        // SAFETY: module initializers run here; the modules this crate loads
        // are system libraries without unsound initialization.
        let library = unsafe { Library::new(name) }.map_err(|source| Error::ModuleLoad {
            module: name.to_string(),
            code: platform_error_code(&source),
            source,
        })?;

        Ok(Self {
            name: name.to_string(),
            library,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves an exported symbol by name.
    ///
    /// # Safety
    ///
    /// `T` must match the export's real type and calling convention.
    pub unsafe fn resolve<T>(&self, symbol: &str) -> Result<EntryPoint<'_, T>> {
        unsafe { self.library.get::<T>(symbol.as_bytes()) }.map_err(|source| {
            Error::SymbolResolution {
                module: self.name.clone(),
                symbol: symbol.to_string(),
                source,
            }
        })
    }

    /// Unloads the module. Every entry point resolved from it becomes invalid.
    pub fn release(self) -> Result<()> {
        debug!("Releasing native module {}", self.name);
        let name = self.name;
        self.library
            .close()
            .map_err(|source| Error::ModuleRelease { module: name, source })
    }
}

impl fmt::Debug for NativeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeModule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The OS error code libloading captured when the call failed.
///
/// Windows failures carry the `GetLastError` value as an `io::Error` in the
/// source chain; dlopen failures carry only text, so they yield `None`.
fn platform_error_code(error: &libloading::Error) -> Option<i32> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(error) = current {
        if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
            return io_error.raw_os_error();
        }
        current = error.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_MODULE: &str = "dhcpmgmt-definitely-missing-module.dll";

    #[test]
    fn test_load_missing_module() {
        let error = NativeModule::load(MISSING_MODULE).unwrap_err();
        match error {
            Error::ModuleLoad { module, code, .. } => {
                assert_eq!(module, MISSING_MODULE);
                // ERROR_MOD_NOT_FOUND
                #[cfg(windows)]
                assert_eq!(code, Some(126));
                #[cfg(not(windows))]
                assert_eq!(code, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_platform_error_code_without_os_error() {
        assert_eq!(platform_error_code(&libloading::Error::DlOpenUnknown), None);
        assert_eq!(platform_error_code(&libloading::Error::DlSymUnknown), None);
    }

    #[cfg(windows)]
    #[test]
    fn test_resolve_and_release_system_module() {
        let module = NativeModule::load("kernel32.dll").unwrap();
        let entry_point =
            unsafe { module.resolve::<unsafe extern "system" fn() -> u32>("GetTickCount") };
        assert!(entry_point.is_ok());
        drop(entry_point);

        let missing = unsafe { module.resolve::<unsafe extern "system" fn()>("NoSuchExport") };
        assert!(matches!(missing, Err(Error::SymbolResolution { .. })));
        drop(missing);

        module.release().unwrap();
    }
}
