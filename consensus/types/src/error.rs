//! Invariant-violation errors: out-of-range indices, length mismatches, arithmetic overflow.
//! These are programming errors, not protocol outcomes -- callers should treat them as fatal
//! rather than attempt recovery.

use crate::primitives::{Epoch, Slot, ValidatorIndex};
use safe_arith::ArithError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SlotOutOfRange { slot: Slot, state_slot: Slot },
    EpochOutOfRange { epoch: Epoch },
    UnknownValidator(ValidatorIndex),
    IndexOutOfRange(usize),
    ArithError(ArithError),
    InvalidFlagIndex(usize),
    SszTypesError(ssz_types::Error),
}

impl From<ArithError> for Error {
    fn from(e: ArithError) -> Self {
        Error::ArithError(e)
    }
}

impl From<ssz_types::Error> for Error {
    fn from(e: ssz_types::Error) -> Self {
        Error::SszTypesError(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}
