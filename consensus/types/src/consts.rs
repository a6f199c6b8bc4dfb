//! Compile-time list/vector bounds for SSZ containers, and the handful of numeric constants
//! that are truly fixed (as opposed to the overridable ones on [`ChainSpec`]).
//!
//! The engine targets a single fork (phase 0), so these bounds are concrete `typenum` constants
//! rather than a generic `EthSpec` parameter threaded through every container -- these constants
//! change per fork but never within a fork.

use ssz_types::typenum::{U1, U1024, U128, U16, U16777216, U2048, U4, U4096, U65536, U8192};

/// `SLOTS_PER_HISTORICAL_ROOT`: length of the `block_roots` / `state_roots` ring buffers.
pub type SlotsPerHistoricalRoot = U8192;
/// `EPOCHS_PER_HISTORICAL_VECTOR`: length of the `randao_mixes` ring buffer.
pub type EpochsPerHistoricalVector = U65536;
/// `EPOCHS_PER_SLASHINGS_VECTOR`: length of the `slashings` ring buffer.
pub type EpochsPerSlashingsVector = U8192;
/// `SLOTS_PER_ETH1_VOTING_PERIOD`: bound on `eth1_data_votes`.
pub type SlotsPerEth1VotingPeriod = U1024;
/// `VALIDATOR_REGISTRY_LIMIT` = 2**40: bound on `validators` / `balances`.
pub type ValidatorRegistryLimit = ssz_types::typenum::U1099511627776;
/// Bound on `historical_roots`.
pub type HistoricalRootsLimit = U16777216;
/// `MAX_VALIDATORS_PER_COMMITTEE`: bound on an attestation's aggregation bitlist.
pub type MaxValidatorsPerCommittee = U2048;
pub type MaxProposerSlashings = U16;
pub type MaxAttesterSlashings = U1;
pub type MaxAttestations = U128;
pub type MaxDeposits = U16;
pub type MaxVoluntaryExits = U16;
/// Bound on `previous_epoch_attestations` / `current_epoch_attestations`:
/// `MAX_ATTESTATIONS * SLOTS_PER_EPOCH`.
pub type MaxAttestationsPerEpoch = U4096;
/// Length of the `justification_bits` bitvector.
pub type JustificationBitsLength = U4;
/// `DEPOSIT_CONTRACT_TREE_DEPTH + 1`, the length of a deposit Merkle proof.
pub type DepositProofLength = ssz_types::typenum::U33;

pub const SLOTS_PER_EPOCH: u64 = 32;
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;
pub const SHUFFLE_ROUND_COUNT: u8 = 90;
