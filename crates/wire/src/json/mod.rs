//! JSON wire format for the transactional HTTP endpoint
//!
//! - [`encode`]: statement batches posted to begin/execute/commit URIs
//! - [`decode`]: response envelopes and discovery documents
//! - [`hydrate`]: REST-encoded result cells into [`graphtx_core::Value`]s

pub mod decode;
pub mod encode;
pub mod error;
pub mod hydrate;

pub use decode::{
    decode_response, decode_service_document, RawRow, ServerError, ServiceDocument,
    StatementResult, TransactionInfo, TransactionResponse,
};
pub use encode::{encode_batch, ResultFormat, Statement};
pub use error::WireError;
pub use hydrate::{Hydrate, RestHydrator};
