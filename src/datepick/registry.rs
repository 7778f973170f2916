//! # Registry / Lifecycle
//!
//! The registry is the only shared mutable state in the engine: every live
//! picker, keyed by [`PickerId`] and by the host element it is attached to,
//! plus the pair slots that tie range pickers together.
//!
//! ## Transitions
//!
//! - **Init**: the first successful [`Registry::register`] attaches the global
//!   listeners (document click / focus handling).
//! - **Teardown**: the [`Registry::unregister`] that empties the registry
//!   detaches them again.
//!
//! A picker is fully inserted before listeners are attached and fully removed
//! before they are detached, so the registry is never consulted with a
//! half-built entry.
//!
//! ## Tombstones
//!
//! Removed ids are remembered. Looking one up yields
//! [`DatepickError::AlreadyRemoved`] rather than a generic "unknown picker",
//! which is what makes a second `remove()` a reported error.
//!
//! A tombstone also records the pair partner the picker had when it went
//! away, so `remove_pair` can still reach a live sibling from the removed
//! side. Tombstones are never dropped: ids are random and a stale handle must
//! keep failing with `AlreadyRemoved` for the lifetime of the registry. Each
//! one is a [`PickerId`] plus a [`Tombstone`], so a workspace that churns
//! through pickers grows by that much per removal and nothing more.

use crate::error::{DatepickError, Result};
use crate::host::HostId;
use crate::model::{PickerId, PickerState};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairSlot {
    Waiting(PickerId),
    Linked(PickerId, PickerId),
}

/// What is left of a removed picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tombstone {
    pub range_member: bool,
    /// The linked sibling at removal time, if any.
    pub sibling: Option<PickerId>,
}

#[derive(Debug, Default)]
pub struct Registry {
    pickers: HashMap<PickerId, PickerState>,
    order: Vec<PickerId>,
    hosts: HashMap<HostId, PickerId>,
    pairs: HashMap<String, PairSlot>,
    removed: HashMap<PickerId, Tombstone>,
    listening: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }

    /// Whether the global listeners are currently attached.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Live pickers in registration order.
    pub fn ids(&self) -> Vec<PickerId> {
        self.order.clone()
    }

    pub fn picker_for_host(&self, host: &HostId) -> Option<PickerId> {
        self.hosts.get(host).copied()
    }

    pub fn ensure_host_free(&self, host: &HostId) -> Result<()> {
        if self.hosts.contains_key(host) {
            return Err(DatepickError::Validation(format!(
                "A datepicker already exists on {}.",
                host
            )));
        }
        Ok(())
    }

    /// The picker waiting for a partner under `pair_id`, if any.
    ///
    /// Fails when the id already names a complete pair.
    pub fn waiting_partner(&self, pair_id: &str) -> Result<Option<PickerId>> {
        match self.pairs.get(pair_id) {
            None => Ok(None),
            Some(PairSlot::Waiting(first)) => Ok(Some(*first)),
            Some(PairSlot::Linked(..)) => Err(DatepickError::DuplicatePairId(pair_id.to_string())),
        }
    }

    pub fn get(&self, id: PickerId) -> Result<&PickerState> {
        if self.removed.contains_key(&id) {
            return Err(DatepickError::AlreadyRemoved);
        }
        self.pickers.get(&id).ok_or(DatepickError::UnknownPicker)
    }

    pub fn get_mut(&mut self, id: PickerId) -> Result<&mut PickerState> {
        if self.removed.contains_key(&id) {
            return Err(DatepickError::AlreadyRemoved);
        }
        self.pickers.get_mut(&id).ok_or(DatepickError::UnknownPicker)
    }

    pub fn is_removed(&self, id: PickerId) -> bool {
        self.removed.contains_key(&id)
    }

    pub fn tombstone(&self, id: PickerId) -> Option<&Tombstone> {
        self.removed.get(&id)
    }

    pub fn tombstone_count(&self) -> usize {
        self.removed.len()
    }

    /// Inserts a fully built picker, linking it to a waiting partner if its
    /// pair link names one.
    pub fn register(&mut self, mut state: PickerState) -> Result<PickerId> {
        self.ensure_host_free(&state.host.host_id)?;

        let id = state.id;
        let mut partner = None;
        if let Some(link) = state.pair.as_mut() {
            partner = self.waiting_partner(&link.pair_id)?;
            link.is_first = partner.is_none();
            link.sibling = partner;
        }

        if let Some(link) = state.pair.as_ref() {
            let slot = match partner {
                Some(first) => PairSlot::Linked(first, id),
                None => PairSlot::Waiting(id),
            };
            self.pairs.insert(link.pair_id.clone(), slot);
        }
        if let Some(first) = partner {
            if let Some(link) = self.pickers.get_mut(&first).and_then(|p| p.pair.as_mut()) {
                link.sibling = Some(id);
            }
            debug!(pair = ?state.pair.as_ref().map(|l| &l.pair_id), first = %first, second = %id, "range pair linked");
        }

        self.hosts.insert(state.host.host_id.clone(), id);
        self.pickers.insert(id, state);
        self.order.push(id);

        if !self.listening {
            self.listening = true;
            info!("first picker registered, attaching global listeners");
        }
        Ok(id)
    }

    /// Takes a picker out of the registry, dissolving its pair.
    ///
    /// The sibling (if any) is demoted to a standalone picker and the pair id
    /// becomes free again.
    pub fn unregister(&mut self, id: PickerId) -> Result<PickerState> {
        if self.removed.contains_key(&id) {
            return Err(DatepickError::AlreadyRemoved);
        }
        let state = self.pickers.remove(&id).ok_or(DatepickError::UnknownPicker)?;
        self.removed.insert(
            id,
            Tombstone {
                range_member: state.range_member,
                sibling: state.sibling(),
            },
        );
        self.order.retain(|other| *other != id);
        self.hosts.remove(&state.host.host_id);

        if let Some(link) = state.pair.as_ref() {
            self.pairs.remove(&link.pair_id);
            if let Some(sibling) = link.sibling.and_then(|s| self.pickers.get_mut(&s)) {
                sibling.pair = None;
                debug!(sibling = %sibling.id, "sibling demoted to standalone picker");
            }
        }

        if self.pickers.is_empty() && self.listening {
            self.listening = false;
            info!("last picker removed, detaching global listeners");
        }
        Ok(state)
    }
}
