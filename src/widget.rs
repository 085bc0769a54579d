//! Per-element banner instances.
//!
//! A page may host several banners; each is initialized once under a key
//! (typically the element id) and later driven by [`Command`]s.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;
use tracing::debug;

use crate::command::Command;
use crate::config::BannerConfig;
use crate::controller::BannerController;
use crate::error::BannerError;
use crate::ports::{ImageHost, Surface};

pub struct BannerWidgets<K, S, H>
where
    S: Surface,
    S::Image: Clone,
    H: ImageHost<Image = S::Image>,
{
    instances: HashMap<K, BannerController<S, H>>,
}

impl<K, S, H> BannerWidgets<K, S, H>
where
    K: Eq + Hash + Debug,
    S: Surface,
    S::Image: Clone,
    H: ImageHost<Image = S::Image>,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Creates and animates a banner for `key`.
    ///
    /// Returns `Ok(false)` without touching anything when `key` already has
    /// a banner or the surface cannot do pixel access.
    pub fn init(&mut self, key: K, config: &BannerConfig, surface: S, host: H) -> Result<bool, BannerError> {
        if self.instances.contains_key(&key) {
            debug!(?key, "banner already initialized");
            return Ok(false);
        }

        let mut banner = BannerController::new(surface, host, config);
        if !banner.is_supported() {
            debug!(?key, "surface unsupported, banner skipped");
            return Ok(false);
        }

        banner.animate(&config.paths, &config.paths_prefix)?;
        self.instances.insert(key, banner);
        Ok(true)
    }

    pub fn dispatch(&mut self, key: &K, command: Command) -> Result<(), BannerError> {
        let banner = self
            .instances
            .get_mut(key)
            .ok_or_else(|| BannerError::UnknownInstance(format!("{key:?}")))?;

        banner.apply(command)
    }

    pub fn advance_all(&mut self, elapsed: Duration) -> Result<(), BannerError> {
        for banner in self.instances.values_mut() {
            banner.advance(elapsed)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&BannerController<S, H>> {
        self.instances.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<K, S, H> Default for BannerWidgets<K, S, H>
where
    K: Eq + Hash + Debug,
    S: Surface,
    S::Image: Clone,
    H: ImageHost<Image = S::Image>,
{
    fn default() -> Self {
        Self::new()
    }
}
