//! Chain-level governance.

use il_01_entity_store::{EntityWriter, StateWriter};
use shared_types::{LedgerError, SetLastBlockParams, TxContext};
use tracing::info;

/// `SetLastBlock`: stop accepting transactions after `block_height`
/// (-1 lifts the limit). Accepted even while the chain is disabled.
pub fn set_last_block<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &SetLastBlockParams,
) -> Result<(), LedgerError> {
    if params.block_height < -1 {
        return Err(LedgerError::InvalidBlockHeight);
    }
    state.set_last_block(params.block_height)?;
    info!(
        last_block = params.block_height,
        height = ctx.height,
        "Last block set"
    );
    Ok(())
}
