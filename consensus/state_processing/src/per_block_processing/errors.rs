//! Per-operation error taxonomy. Every variant here is a *consensus-invalid input* in the sense
//! of category (1): the caller rejects the block without having mutated `state`, it is never a
//! bug in this engine.

use types::primitives::{Epoch, Slot, ValidatorIndex};
use types::Error as BeaconStateError;

#[derive(Debug, PartialEq, Clone)]
pub enum BlockOperationError<T> {
    Invalid(T),
    BeaconStateError(BeaconStateError),
}

impl<T> BlockOperationError<T> {
    pub fn invalid(reason: T) -> Self {
        BlockOperationError::Invalid(reason)
    }
}

impl<T> From<BeaconStateError> for BlockOperationError<T> {
    fn from(e: BeaconStateError) -> Self {
        BlockOperationError::BeaconStateError(e)
    }
}

impl<T> From<safe_arith::ArithError> for BlockOperationError<T> {
    fn from(e: safe_arith::ArithError) -> Self {
        BlockOperationError::BeaconStateError(BeaconStateError::ArithError(e))
    }
}

macro_rules! impl_from_beacon_state_error {
    ($type: ident) => {
        impl From<BeaconStateError> for $type {
            fn from(e: BeaconStateError) -> $type {
                $type::BeaconStateError(e)
            }
        }
    };
}

#[derive(Debug, PartialEq, Clone)]
pub enum HeaderInvalid {
    StateSlotMismatch,
    ParentBlockRootMismatch { state: types::Hash256, block: types::Hash256 },
    ProposerSlashed(ValidatorIndex),
    ProposerIndexMismatch { block: ValidatorIndex, expected: ValidatorIndex },
    BadSignature,
    BeaconStateError(BeaconStateError),
}
impl_from_beacon_state_error!(HeaderInvalid);

#[derive(Debug, PartialEq, Clone)]
pub enum RandaoInvalid {
    BadSignature,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ProposerSlashingInvalid {
    ProposerUnknown(ValidatorIndex),
    ProposersDiffer,
    SlotMismatch { slot_1: Slot, slot_2: Slot },
    BodiesMatch,
    ProposerNotSlashable(ValidatorIndex),
    BadSignature(usize),
    BeaconStateError(BeaconStateError),
}
impl_from_beacon_state_error!(ProposerSlashingInvalid);

#[derive(Debug, PartialEq, Clone)]
pub enum AttesterSlashingInvalid {
    NotSlashable,
    NoSlashableIndices,
    IndicesNotSorted,
    EmptyIndices,
    BadSignature,
    BeaconStateError(BeaconStateError),
}
impl_from_beacon_state_error!(AttesterSlashingInvalid);

#[derive(Debug, PartialEq, Clone)]
pub enum AttestationInvalid {
    BadCommitteeIndex,
    BadTargetEpoch,
    WrongJustifiedCheckpoint,
    IncludedTooEarly { state: Slot, delay: Slot, attestation: Slot },
    IncludedTooLate { state: Slot, attestation: Slot },
    BadAggregationBitsLength { committee_len: usize, bitfield_len: usize },
    EmptyAggregationBitfield,
    BadSignature,
    BeaconStateError(BeaconStateError),
}
impl_from_beacon_state_error!(AttestationInvalid);

#[derive(Debug, PartialEq, Clone)]
pub enum DepositInvalid {
    BadMerkleProof,
    BadSignature,
    BeaconStateError(BeaconStateError),
}
impl_from_beacon_state_error!(DepositInvalid);

#[derive(Debug, PartialEq, Clone)]
pub enum ExitInvalid {
    ValidatorUnknown(ValidatorIndex),
    AlreadyExited(ValidatorIndex),
    NotActive(ValidatorIndex),
    FutureEpoch { state: Epoch, exit: Epoch },
    TooYoungToExit { current_epoch: Epoch, earliest_exit_epoch: Epoch },
    BadSignature,
    BeaconStateError(BeaconStateError),
}
impl_from_beacon_state_error!(ExitInvalid);

#[derive(Debug, PartialEq, Clone)]
pub enum BlockProcessingError {
    RandaoSignatureInvalid,
    HeaderInvalid { reason: HeaderInvalid },
    ProposerSlashingInvalid { index: usize, reason: ProposerSlashingInvalid },
    AttesterSlashingInvalid { index: usize, reason: AttesterSlashingInvalid },
    AttestationInvalid { index: usize, reason: AttestationInvalid },
    DepositInvalid { index: usize, reason: DepositInvalid },
    ExitInvalid { index: usize, reason: ExitInvalid },
    TooManyOperations,
    BeaconStateError(BeaconStateError),
    ArithError(safe_arith::ArithError),
}
impl_from_beacon_state_error!(BlockProcessingError);

impl From<safe_arith::ArithError> for BlockProcessingError {
    fn from(e: safe_arith::ArithError) -> Self {
        BlockProcessingError::ArithError(e)
    }
}

impl From<BlockOperationError<HeaderInvalid>> for BlockProcessingError {
    fn from(e: BlockOperationError<HeaderInvalid>) -> Self {
        match e {
            BlockOperationError::Invalid(reason) => BlockProcessingError::HeaderInvalid { reason },
            BlockOperationError::BeaconStateError(e) => BlockProcessingError::BeaconStateError(e),
        }
    }
}

impl From<BlockOperationError<RandaoInvalid>> for BlockProcessingError {
    fn from(e: BlockOperationError<RandaoInvalid>) -> Self {
        match e {
            BlockOperationError::Invalid(RandaoInvalid::BadSignature) => {
                BlockProcessingError::RandaoSignatureInvalid
            }
            BlockOperationError::BeaconStateError(e) => BlockProcessingError::BeaconStateError(e),
        }
    }
}

macro_rules! impl_into_block_processing_error_with_index {
    ($type: ident, $variant: ident) => {
        impl From<(usize, BlockOperationError<$type>)> for BlockProcessingError {
            fn from((index, e): (usize, BlockOperationError<$type>)) -> Self {
                match e {
                    BlockOperationError::Invalid(reason) => {
                        BlockProcessingError::$variant { index, reason }
                    }
                    BlockOperationError::BeaconStateError(e) => {
                        BlockProcessingError::BeaconStateError(e)
                    }
                }
            }
        }
    };
}

impl_into_block_processing_error_with_index!(ProposerSlashingInvalid, ProposerSlashingInvalid);
impl_into_block_processing_error_with_index!(AttesterSlashingInvalid, AttesterSlashingInvalid);
impl_into_block_processing_error_with_index!(AttestationInvalid, AttestationInvalid);
impl_into_block_processing_error_with_index!(DepositInvalid, DepositInvalid);
impl_into_block_processing_error_with_index!(ExitInvalid, ExitInvalid);
