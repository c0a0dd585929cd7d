//! Supported devices and the kernel modules backing them
//!
//! # Examples
//!
//! ```rust
//! # use devmgr::device;
//! let dev = device::resolve("Camera").unwrap();
//! assert_eq!(dev.module(), "uvcvideo");
//! ```

/// A device `devmgr` knows how to toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    /// Lowercase identifier given on the command line
    name: &'static str,

    /// Kernel module providing the device
    module: &'static str,
}

impl Device {
    const fn new(name: &'static str, module: &'static str) -> Self {
        Self { name, module }
    }

    /// Device identifier, always lowercase
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kernel module name
    pub fn module(&self) -> &'static str {
        self.module
    }
}

/// Every supported device.
///
/// Names must be unique and lowercase, modules may repeat.
pub const DEVICES: &[Device] = &[
    // USB Video Class
    Device::new("camera", "uvcvideo"),
    Device::new("bluetooth", "btusb"),
];

/// Look up a device by name, ignoring case
pub fn resolve(name: &str) -> Option<&'static Device> {
    let name = name.to_lowercase();
    DEVICES.iter().find(|d| d.name == name)
}

/// Supported device names, in table order
pub fn names() -> impl Iterator<Item = &'static str> {
    DEVICES.iter().map(Device::name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn resolves_known_devices() {
        assert_eq!(resolve("camera").map(Device::module), Some("uvcvideo"));
        assert_eq!(resolve("bluetooth").map(Device::module), Some("btusb"));
    }

    #[test]
    fn case_insensitive() {
        for name in ["CAMERA", "Camera", "cAmErA"] {
            assert_eq!(resolve(name).map(Device::name), Some("camera"));
        }
        assert_eq!(resolve("BlueTooth").map(Device::module), Some("btusb"));
    }

    #[test]
    fn unknown_devices() {
        for name in ["", "wifi", "cam", "camera ", "uvcvideo"] {
            assert!(resolve(name).is_none(), "{name:?} resolved");
        }
    }

    #[test]
    fn table_invariants() {
        let mut seen = HashSet::new();
        for d in DEVICES {
            assert_eq!(d.name, d.name.to_lowercase());
            assert!(seen.insert(d.name), "duplicate device {}", d.name);
        }
        assert_eq!(names().collect::<Vec<_>>(), ["camera", "bluetooth"]);
    }
}
