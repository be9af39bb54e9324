//! Hierarchical device groupings, e.g. `Home > Living Room > Sensor1`.

use hemvakt_core::MultiwayTree;
use tracing::info;

use crate::{normalize, require_text, MonitorError};

pub struct DeviceGroups {
    tree: MultiwayTree<String>,
}

impl DeviceGroups {
    pub fn new(root: &str) -> Result<Self, MonitorError> {
        let root = require_text("Root group", root)?;
        info!(root, "Device tree created");
        Ok(Self {
            tree: MultiwayTree::new(root.to_owned()),
        })
    }

    pub fn root(&self) -> &str {
        self.tree.root().data()
    }

    pub fn add(&mut self, parent: &str, device: &str) -> Result<(), MonitorError> {
        let device = require_text("Device", device)?;
        let parent = normalize(parent);
        self.tree.add_child(&key(parent), device.to_owned())?;
        info!(parent, device, "Device added");
        Ok(())
    }

    /// Removes `device` and everything under it. Returns how many nodes
    /// went with it.
    pub fn remove(&mut self, parent: &str, device: &str) -> Result<usize, MonitorError> {
        let (parent, device) = (normalize(parent), normalize(device));
        let removed = self.tree.remove_child(&key(parent), &key(device))?;
        let count = removed.walk().count();
        info!(parent, device, removed = count, "Device removed");
        Ok(count)
    }

    /// Moves `device` with its subtree from `from` to the end of `to`'s
    /// children.
    pub fn relocate(&mut self, device: &str, from: &str, to: &str) -> Result<(), MonitorError> {
        let (device, from, to) = (normalize(device), normalize(from), normalize(to));
        self.tree.move_child(&key(device), &key(from), &key(to))?;
        info!(device, from, to, "Device moved");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tree.find(&key(normalize(name))).is_some()
    }

    /// Rendering of the first group or device named `name`.
    pub fn subtree(&self, name: &str) -> Option<String> {
        self.tree.render_subtree(&key(normalize(name)))
    }

    pub fn render(&self) -> String {
        self.tree.render()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// A device tree always holds its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

fn key(name: &str) -> String {
    name.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemvakt_core::{ContainerError, Missing};

    fn home() -> DeviceGroups {
        let mut groups = DeviceGroups::new("Home").unwrap();
        groups.add("Home", "Living Room").unwrap();
        groups.add("Home", "Kitchen").unwrap();
        groups.add("Living Room", "Sensor1").unwrap();
        groups
    }

    #[test]
    fn relocate_moves_subtree() {
        let mut groups = home();
        groups.relocate("Sensor1", "Living Room", "Kitchen").unwrap();
        assert_eq!(groups.subtree("Kitchen").unwrap(), "- Kitchen\n    - Sensor1\n");
        assert_eq!(groups.subtree("Living Room").unwrap(), "- Living Room\n");
    }

    #[test]
    fn remove_counts_subtree() {
        let mut groups = home();
        assert_eq!(groups.remove("Home", "Living Room").unwrap(), 2);
        assert!(!groups.contains("Sensor1"));
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn errors_leave_tree_unchanged() {
        let mut groups = home();
        let before = groups.render();

        assert!(matches!(
            groups.add("Garage", "Camera"),
            Err(MonitorError::Container(ContainerError::NotFound(Missing::Parent)))
        ));
        assert!(matches!(
            groups.add("Home", "Kitchen"),
            Err(MonitorError::Container(ContainerError::DuplicateKey))
        ));
        assert!(matches!(
            groups.relocate("Living Room", "Home", "Sensor1"),
            Err(MonitorError::Container(ContainerError::WouldCycle))
        ));
        assert!(matches!(
            groups.relocate("Sensor1", "Attic", "Cellar"),
            Err(MonitorError::Container(ContainerError::NotFound(Missing::BothParents)))
        ));
        assert_eq!(groups.render(), before);
    }

    #[test]
    fn padded_names_find_stored_nodes() {
        let mut groups = home();
        groups.add(" Home ", " Garage ").unwrap();
        assert!(groups.contains("Garage"));
        assert_eq!(groups.subtree(" Garage").unwrap(), "- Garage\n");

        groups.relocate(" Sensor1 ", " Living Room", "Garage ").unwrap();
        assert_eq!(groups.subtree("Garage").unwrap(), "- Garage\n    - Sensor1\n");

        assert_eq!(groups.remove("Home", " Kitchen ").unwrap(), 1);
        assert!(!groups.contains(" Kitchen "));
    }

    #[test]
    fn blank_root_rejected() {
        assert!(matches!(DeviceGroups::new(""), Err(MonitorError::Blank(_))));
    }
}
