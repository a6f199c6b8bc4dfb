//! Phase-0 data model: every container the state-transition engine operates on, plus the fixed
//! bounds and configuration constants ([`consts`], [`chain_spec::ChainSpec`]) it's built against.

pub mod attestation;
pub mod attestation_data;
pub mod attester_slashing;
pub mod beacon_block;
pub mod beacon_block_body;
pub mod beacon_block_header;
pub mod beacon_state;
pub mod chain_spec;
pub mod checkpoint;
pub mod consts;
pub mod deposit;
pub mod deposit_data;
pub mod error;
pub mod eth1_data;
pub mod fork;
pub mod historical_batch;
pub mod indexed_attestation;
pub mod pending_attestation;
pub mod primitives;
pub mod proposer_slashing;
pub mod signed;
pub mod signing_data;
pub mod validator;
pub mod voluntary_exit;

pub use attestation::Attestation;
pub use attestation_data::AttestationData;
pub use attester_slashing::AttesterSlashing;
pub use beacon_block::BeaconBlock;
pub use beacon_block_body::BeaconBlockBody;
pub use beacon_block_header::BeaconBlockHeader;
pub use beacon_state::BeaconState;
pub use chain_spec::ChainSpec;
pub use checkpoint::Checkpoint;
pub use deposit::Deposit;
pub use deposit_data::DepositData;
pub use error::Error;
pub use eth1_data::Eth1Data;
pub use fork::Fork;
pub use historical_batch::HistoricalBatch;
pub use indexed_attestation::IndexedAttestation;
pub use pending_attestation::PendingAttestation;
pub use primitives::*;
pub use proposer_slashing::ProposerSlashing;
pub use signed::{SignedBeaconBlock, SignedBeaconBlockHeader, SignedVoluntaryExit};
pub use signing_data::SigningData;
pub use validator::Validator;
pub use voluntary_exit::VoluntaryExit;
