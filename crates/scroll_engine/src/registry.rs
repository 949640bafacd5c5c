use std::collections::BTreeMap;

use scroll_core::LoadEdge;
use scroll_logging::scroll_info;

use crate::{RegistryError, SurfaceDriver, SurfaceId};

/// Mounted surfaces keyed by their stable identifier.
///
/// Sessions are never shared: each id maps to exactly one driver, created on
/// mount and torn down on unmount.
#[derive(Default)]
pub struct SurfaceRegistry {
    drivers: BTreeMap<SurfaceId, SurfaceDriver>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, driver: SurfaceDriver) -> Result<(), RegistryError> {
        let id = driver.id();
        if self.drivers.contains_key(&id) {
            return Err(RegistryError::AlreadyMounted(id));
        }
        scroll_info!("mounting surface {}", id);
        self.drivers.insert(id, driver);
        Ok(())
    }

    /// Detaches and removes the driver; any late completion it spawned is discarded.
    pub fn unmount(&mut self, id: SurfaceId) -> Result<SurfaceDriver, RegistryError> {
        let mut driver = self
            .drivers
            .remove(&id)
            .ok_or(RegistryError::UnknownSurface(id))?;
        driver.detach();
        scroll_info!("unmounted surface {}", id);
        Ok(driver)
    }

    pub fn get(&self, id: SurfaceId) -> Option<&SurfaceDriver> {
        self.drivers.get(&id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceDriver> {
        self.drivers.get_mut(&id)
    }

    pub fn trigger(&mut self, id: SurfaceId, edge: LoadEdge) -> Result<(), RegistryError> {
        self.driver_mut(id)?.trigger_load(edge);
        Ok(())
    }

    /// Tears down the session of a mounted surface without unmounting it.
    pub fn cancel(&mut self, id: SurfaceId) -> Result<(), RegistryError> {
        self.driver_mut(id)?.detach();
        Ok(())
    }

    /// Drains every driver's inbox. Returns the total number of messages handled.
    pub fn process_pending(&mut self) -> usize {
        self.drivers
            .values_mut()
            .map(SurfaceDriver::process_pending)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    fn driver_mut(&mut self, id: SurfaceId) -> Result<&mut SurfaceDriver, RegistryError> {
        self.drivers
            .get_mut(&id)
            .ok_or(RegistryError::UnknownSurface(id))
    }
}
