//! Context passed to invocation handlers.
//!
//! Carries the raw arguments, the call identifier, the ingestion settings and
//! a reference to the store. Handlers access everything they need through the
//! context.

use super::error::HandlerError;
use crate::config::IngestConfig;

/// The context passed to every handler.
///
/// Generic over `S` (the store type) so handlers work with whatever store
/// the service is configured with.
pub struct Context<'a, S> {
    function: String,
    args: Vec<Vec<u8>>,
    call_id: String,
    config: &'a IngestConfig,
    store: &'a S,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(
        function: String,
        args: Vec<Vec<u8>>,
        call_id: String,
        config: &'a IngestConfig,
        store: &'a S,
    ) -> Self {
        Self {
            function,
            args,
            call_id,
            config,
            store,
        }
    }

    /// The function name being handled.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[Vec<u8>] {
        &self.args
    }

    /// Require exactly `count` arguments.
    pub fn expect_args(&self, count: usize, usage: &'static str) -> Result<(), HandlerError> {
        if self.args.len() != count {
            return Err(HandlerError::ArgumentCount {
                expected: count,
                actual: self.args.len(),
                usage,
            });
        }
        Ok(())
    }

    /// The only argument of a one-argument function.
    pub fn single_arg(&self, usage: &'static str) -> Result<&[u8], HandlerError> {
        self.expect_args(1, usage)?;
        Ok(&self.args[0])
    }

    /// Identifier assigned to this call.
    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    pub fn config(&self) -> &IngestConfig {
        self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &'a S {
        self.store
    }
}
