//! NVS-backed configuration storage.
//!
//! Implements [`ConfigPort`]: the whole [`SystemConfig`] is stored as one
//! postcard blob under the `sentinel` namespace.  Every field is
//! range-checked before it reaches flash; an out-of-range value is
//! rejected with `ValidationFailed`, never clamped.  On the host the
//! adapter runs against an in-memory map so the config path is testable
//! without a flash partition.

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;
use log::info;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const NAMESPACE: &str = "sentinel";
const CONFIG_KEY: &str = "syscfg";

/// Read buffer for the stored blob; the config encodes to well under this.
const BLOB_CAPACITY: usize = 256;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: std::cell::RefCell<HashMap<String, Vec<u8>>>,
}

/// NVS identifiers are limited to 15 characters plus NUL.
#[cfg(target_os = "espidf")]
fn nvs_name(s: &str) -> [u8; 16] {
    let mut out = [0u8; 16];
    let n = s.len().min(15);
    out[..n].copy_from_slice(&s.as_bytes()[..n]);
    out
}

impl NvsAdapter {
    /// Bring up the NVS flash partition and return the adapter.
    ///
    /// A partition reporting no free pages or a newer layout version is
    /// erased and initialised again from scratch; any other init failure
    /// surfaces as `IoError` and the caller decides whether to run
    /// without persistence.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        Self::flash_init()?;

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: in-memory simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }

    #[cfg(target_os = "espidf")]
    fn flash_init() -> Result<(), ConfigError> {
        // SAFETY: single main-task context, before any other NVS use.
        let mut rc = unsafe { nvs_flash_init() };
        if rc == ESP_ERR_NVS_NO_FREE_PAGES || rc == ESP_ERR_NVS_NEW_VERSION_FOUND {
            log::warn!("NVS partition unusable (rc={}), erasing", rc);
            if unsafe { nvs_flash_erase() } != ESP_OK {
                return Err(ConfigError::IoError);
            }
            rc = unsafe { nvs_flash_init() };
        }
        if rc != ESP_OK {
            return Err(ConfigError::IoError);
        }
        info!("NvsAdapter: flash partition ready");
        Ok(())
    }

    /// Run `f` against an open handle on our namespace, closing it on
    /// every path.
    #[cfg(target_os = "espidf")]
    fn with_handle<T>(
        write: bool,
        f: impl FnOnce(nvs_handle_t) -> Result<T, i32>,
    ) -> Result<T, i32> {
        let ns = nvs_name(NAMESPACE);
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let mut handle: nvs_handle_t = 0;
        let rc = unsafe { nvs_open(ns.as_ptr().cast(), mode, &mut handle) };
        if rc != ESP_OK {
            return Err(rc);
        }
        let out = f(handle);
        unsafe { nvs_close(handle) };
        out
    }

    fn read_raw(&self, key: &str, buf: &mut [u8]) -> Result<usize, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            let key = nvs_name(key);
            Self::with_handle(false, |handle| {
                let mut len = buf.len();
                // SAFETY: buf outlives the call; len is in/out for the blob size.
                let rc = unsafe {
                    nvs_get_blob(handle, key.as_ptr().cast(), buf.as_mut_ptr().cast(), &mut len)
                };
                if rc != ESP_OK {
                    return Err(rc);
                }
                Ok(len)
            })
            .map_err(|rc| match rc {
                ESP_ERR_NVS_NOT_FOUND => ConfigError::NotFound,
                _ => ConfigError::IoError,
            })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            match self.store.borrow().get(key) {
                Some(blob) => {
                    let n = blob.len().min(buf.len());
                    buf[..n].copy_from_slice(&blob[..n]);
                    Ok(n)
                }
                None => Err(ConfigError::NotFound),
            }
        }
    }

    fn write_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            let key = nvs_name(key);
            Self::with_handle(true, |handle| {
                // SAFETY: data outlives the call; the handle is read-write.
                let rc = unsafe {
                    nvs_set_blob(handle, key.as_ptr().cast(), data.as_ptr().cast(), data.len())
                };
                if rc != ESP_OK {
                    return Err(rc);
                }
                let rc = unsafe { nvs_commit(handle) };
                if rc != ESP_OK {
                    return Err(rc);
                }
                Ok(())
            })
            .map_err(|rc| match rc {
                ESP_ERR_NVS_NOT_ENOUGH_SPACE => ConfigError::StorageFull,
                _ => ConfigError::IoError,
            })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.store.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }
}

fn validate_config(cfg: &SystemConfig) -> Result<(), ConfigError> {
    if cfg.yellow_dwell_ms > 600_000 {
        return Err(ConfigError::ValidationFailed("yellow_dwell_ms above 600s"));
    }
    if !(10..=10_000).contains(&cfg.control_loop_interval_ms) {
        return Err(ConfigError::ValidationFailed(
            "control_loop_interval_ms outside 10..=10000",
        ));
    }
    if !(1..=86_400).contains(&cfg.telemetry_interval_secs) {
        return Err(ConfigError::ValidationFailed(
            "telemetry_interval_secs outside 1..=86400",
        ));
    }
    Ok(())
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let mut buf = [0u8; BLOB_CAPACITY];
        let n = self.read_raw(CONFIG_KEY, &mut buf)?;
        let cfg: SystemConfig =
            postcard::from_bytes(&buf[..n]).map_err(|_| ConfigError::Corrupted)?;
        // A blob written by older firmware may decode fine yet hold values
        // outside the current ranges; treat that like corruption.
        validate_config(&cfg).map_err(|_| ConfigError::Corrupted)?;
        Ok(cfg)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let blob = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.write_raw(CONFIG_KEY, &blob)?;
        info!("NvsAdapter: config persisted ({} bytes)", blob.len());
        Ok(())
    }
}
