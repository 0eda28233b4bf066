//! Function: batchInsert
//!
//! Takes one argument, the serialized batch, and returns the encoded
//! `BatchResult`.

use crate::ingest::BatchIngestor;
use crate::invoke::{Context, HandlerError};
use crate::store::KeyedStore;

pub const FUNCTION: &str = "batchInsert";

pub fn handle<S: KeyedStore>(ctx: &Context<'_, S>) -> Result<Vec<u8>, HandlerError> {
    let payload = ctx.single_arg("JSON batch data")?;

    let ingestor = BatchIngestor::with_config(ctx.store(), ctx.config());
    let result = ingestor.process(payload)?;

    Ok(result.to_json()?)
}
