//! The phase-0 state-transition engine: a deterministic pure function from `(BeaconState,
//! SignedBeaconBlock)` to the next `BeaconState`, split into the pieces named by its own
//! module tree --
//!
//! - [`epoch_context`]: committee and proposer caches (shuffling), rebuilt or rotated once per
//!   epoch rather than recomputed per lookup.
//! - [`per_epoch_processing`]: the five epoch-boundary stages (justification/finality, rewards
//!   and penalties, registry updates, slashings, final updates).
//! - [`per_slot_processing`]: single-slot advance plus the `process_slots` loop that drives a
//!   state forward to an arbitrary target slot, running epoch processing at every boundary
//!   crossed.
//! - [`per_block_processing`]: the five block-body operation processors plus the header and
//!   RANDAO checks that gate them.
//! - [`state_transition`]: the top-level driver combining the previous two against a signed
//!   block.
//!
//! Networking, BLS internals (treated as an oracle via the [`bls`] crate) and raw SSZ encoding
//! (via `ethereum_ssz`) live outside this crate entirely.

pub mod common;
pub mod epoch_context;
mod macros;
pub mod per_block_processing;
pub mod per_epoch_processing;
pub mod per_slot_processing;
pub mod state_transition;

pub use per_slot_processing::{per_slot_processing, process_slots};
pub use state_transition::{state_transition, StateRootStrategy};
