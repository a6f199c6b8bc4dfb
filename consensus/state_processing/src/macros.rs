/// Returns early with `Err(BlockOperationError::invalid(reason))` unless `condition` holds.
macro_rules! verify {
    ($condition: expr, $result: expr) => {
        if !$condition {
            return Err(crate::per_block_processing::errors::BlockOperationError::invalid(
                $result,
            ));
        }
    };
}

pub(crate) use verify;
