//! Region → element handle lookup.
//!
//! Components register their root element when it mounts and remove it when
//! it unmounts. Anything that wants to act on a region (scroll to pricing,
//! focus the dashboard) goes through [`ViewRegistry::with`], which logs and
//! skips when the region is not on the page.

use std::collections::BTreeMap;

use crate::view_model::Region;

#[derive(Clone, Debug)]
pub struct ViewRegistry<H> {
    handles: BTreeMap<Region, H>,
}

impl<H> Default for ViewRegistry<H> {
    fn default() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }
}

impl<H> ViewRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handle` to `region`, replacing any earlier one.
    pub fn register(&mut self, region: Region, handle: H) {
        if self.handles.insert(region, handle).is_some() {
            tracing::debug!("re-registered view region {:?}", region);
        }
    }

    pub fn unregister(&mut self, region: Region) -> Option<H> {
        self.handles.remove(&region)
    }

    pub fn contains(&self, region: Region) -> bool {
        self.handles.contains_key(&region)
    }

    pub fn get(&self, region: Region) -> Option<&H> {
        self.handles.get(&region)
    }

    /// Run `f` on the region's handle. Returns `None` (and logs) when the
    /// region is absent.
    pub fn with<R>(&self, region: Region, f: impl FnOnce(&H) -> R) -> Option<R> {
        match self.handles.get(&region) {
            Some(handle) => Some(f(handle)),
            None => {
                tracing::warn!("view region {:?} is not mounted, skipping", region);
                None
            }
        }
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.handles.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_region_is_skipped() {
        let registry: ViewRegistry<&str> = ViewRegistry::new();
        assert_eq!(registry.with(Region::Pricing, |h| h.len()), None);
    }

    #[test]
    fn test_register_replace_unregister() {
        let mut registry = ViewRegistry::new();
        registry.register(Region::Pricing, "first");
        registry.register(Region::Pricing, "second");
        assert_eq!(registry.with(Region::Pricing, |h| *h), Some("second"));
        assert_eq!(registry.regions().collect::<Vec<_>>(), vec![Region::Pricing]);

        assert_eq!(registry.unregister(Region::Pricing), Some("second"));
        assert!(!registry.contains(Region::Pricing));
    }
}
