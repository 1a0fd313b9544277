//! Set of currently attached gamepads.
//!
//! [`DeviceRegistry`] is fed by the host's attach/detach notifications and
//! filtered by the host's [`GamepadClassifier`]. It is a plain owned value; the
//! [`Manager`](crate::manager::Manager) keeps it behind the same lock as the
//! normalizer so the battery poller and the notification path never see a
//! half-applied change.

use crate::device::{Device, DeviceId, GamepadClassifier};
use std::collections::HashMap;
use tracing::{debug, info};

pub struct DeviceRegistry {
    classifier: Box<dyn GamepadClassifier>,
    devices: HashMap<DeviceId, Device>,
}

impl DeviceRegistry {
    pub fn new(classifier: impl GamepadClassifier + 'static) -> Self {
        Self {
            classifier: Box::new(classifier),
            devices: HashMap::new(),
        }
    }

    /// Handles an attach notification.
    ///
    /// Returns `true` if the device was classified as a gamepad and is now
    /// tracked.
    pub fn on_device_added(&mut self, id: DeviceId, name: &str) -> bool {
        if !self.classifier.is_gamepad(id) {
            debug!("Ignoring non-gamepad device {} ({:?})", id, name);
            return false;
        }
        info!("Gamepad attached: {} ({:?})", id, name);
        self.devices.insert(id, Device::new(id, name));
        true
    }

    /// Handles a configuration change of an attached device.
    ///
    /// The device is classified again: it is tracked (and renamed) if it is
    /// still a gamepad and dropped otherwise.
    pub fn on_device_changed(&mut self, id: DeviceId, name: &str) -> bool {
        if self.classifier.is_gamepad(id) {
            match self.devices.get_mut(&id) {
                Some(device) => {
                    if device.name != name {
                        debug!("Gamepad {} renamed {:?} -> {:?}", id, device.name, name);
                        device.name = name.to_string();
                    }
                }
                None => {
                    info!("Gamepad attached on change: {} ({:?})", id, name);
                    self.devices.insert(id, Device::new(id, name));
                }
            }
            true
        } else {
            if self.devices.remove(&id).is_some() {
                info!("Device {} is no longer a gamepad, dropping it", id);
            }
            false
        }
    }

    /// Handles a detach notification. Unknown ids are ignored.
    pub fn on_device_removed(&mut self, id: DeviceId) -> Option<Device> {
        let removed = self.devices.remove(&id);
        if let Some(ref device) = removed {
            info!("Gamepad detached: {}", device);
        }
        removed
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices.contains_key(&id)
    }

    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Snapshot of the tracked devices, ordered by id.
    pub fn list_devices(&self) -> Vec<Device> {
        let mut out: Vec<Device> = self.devices.values().cloned().collect();
        out.sort_by_key(|d| d.id);
        out
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DeviceRegistry {
        // odd ids are gamepads
        DeviceRegistry::new(|id: DeviceId| id % 2 == 1)
    }

    #[test]
    fn test_only_gamepads_are_tracked() {
        let mut reg = registry();
        assert!(reg.on_device_added(1, "Pad One"));
        assert!(!reg.on_device_added(2, "Keyboard"));
        assert!(reg.on_device_added(3, "Pad Three"));

        assert!(reg.contains(1));
        assert!(!reg.contains(2));
        assert_eq!(
            reg.list_devices(),
            vec![Device::new(1, "Pad One"), Device::new(3, "Pad Three")]
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut reg = registry();
        reg.on_device_added(5, "Pad");
        assert_eq!(reg.on_device_removed(5), Some(Device::new(5, "Pad")));
        assert_eq!(reg.on_device_removed(5), None);
        assert_eq!(reg.on_device_removed(42), None);
        assert!(reg.list_devices().is_empty());
    }

    #[test]
    fn test_empty_registry_lists_nothing() {
        let reg = registry();
        assert!(reg.is_empty());
        assert!(reg.list_devices().is_empty());
    }

    #[test]
    fn test_change_renames_and_reclassifies() {
        let mut reg = registry();
        reg.on_device_added(1, "Old");
        assert!(reg.on_device_changed(1, "New"));
        assert_eq!(reg.get(1).map(|d| d.name.as_str()), Some("New"));

        // first seen through a change notification
        assert!(reg.on_device_changed(7, "Late"));
        assert!(reg.contains(7));

        // never tracked, still not a gamepad
        assert!(!reg.on_device_changed(4, "Mouse"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_change_drops_device_that_stopped_being_a_gamepad() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let flag = Arc::new(AtomicBool::new(true));
        let f = flag.clone();
        let mut reg = DeviceRegistry::new(move |_id: DeviceId| f.load(Ordering::SeqCst));

        reg.on_device_added(9, "Switchable");
        flag.store(false, Ordering::SeqCst);
        assert!(!reg.on_device_changed(9, "Switchable"));
        assert!(!reg.contains(9));
    }
}
