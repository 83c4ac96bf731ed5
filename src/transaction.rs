//! Cypher transactions.
//!
//! A [`Transaction`] queues statements locally and ships them to the server
//! in batches. The server-side transaction does not exist until the first
//! submission; from then on the server tells the client where to send
//! further work:
//!
//! ```text
//! first execute   POST <begin>            -> Location: <execute>, "commit": <commit>
//! later execute   POST <execute>
//! commit          POST <commit>           (or <begin>/commit if nothing ran yet)
//! rollback        DELETE <execute>        (skipped if nothing ran yet)
//! ```
//!
//! ## Lifecycle
//!
//! A transaction starts open and finishes exactly once, on the first call to
//! [`Transaction::commit`] or [`Transaction::rollback`], whatever the outcome
//! of the HTTP exchange. Every operation on a finished transaction returns
//! [`Error::TransactionFinished`] without touching the network.
//!
//! ## Thread Safety
//!
//! Operations take `&mut self`; one caller drives a transaction at a time.
//! Transactions created by the same session are independent.

use crate::error::{Error, Result, TransactionError};
use crate::transport::Transport;
use graphtx_core::{Parameters, Record, RecordProducer};
use graphtx_wire::{decode_response, encode_batch, Hydrate, Statement, TransactionResponse};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-statement result sets, in submission order.
pub type Results = Vec<Vec<Record>>;

/// A client-side handle on one server-side Cypher transaction.
pub struct Transaction {
    begin_uri: String,
    begin_commit_uri: String,
    execute_uri: Option<String>,
    commit_uri: Option<String>,
    expires: Option<String>,
    pending: Vec<Statement>,
    finished: bool,
    transport: Arc<dyn Transport>,
    hydrator: Arc<dyn Hydrate>,
}

impl Transaction {
    /// Create an open transaction bound to a begin-transaction URI.
    ///
    /// No request is made until statements are submitted.
    pub fn new(
        begin_uri: impl Into<String>,
        transport: Arc<dyn Transport>,
        hydrator: Arc<dyn Hydrate>,
    ) -> Self {
        let begin_uri = begin_uri.into();
        let begin_commit_uri = format!("{}/commit", begin_uri.trim_end_matches('/'));
        Self {
            begin_uri,
            begin_commit_uri,
            execute_uri: None,
            commit_uri: None,
            expires: None,
            pending: Vec::new(),
            finished: false,
            transport,
            hydrator,
        }
    }

    /// Whether the transaction has been committed or rolled back.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of statements queued and not yet submitted.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// URI the first submission is posted to.
    pub fn begin_uri(&self) -> &str {
        &self.begin_uri
    }

    /// Execute URI revealed by the server, once known.
    pub fn execute_uri(&self) -> Option<&str> {
        self.execute_uri.as_deref()
    }

    /// Commit URI revealed by the server, once known.
    pub fn commit_uri(&self) -> Option<&str> {
        self.commit_uri.as_deref()
    }

    /// Server-reported expiry of the idle transaction, once known.
    pub fn expires(&self) -> Option<&str> {
        self.expires.as_deref()
    }

    /// Queue a statement for the next submission.
    ///
    /// No network call is made.
    pub fn append(&mut self, statement: impl Into<String>, parameters: Option<Parameters>) -> Result<()> {
        self.ensure_open()?;
        self.pending.push(Statement::new(statement, parameters));
        Ok(())
    }

    /// Submit queued statements and keep the transaction open.
    ///
    /// A failure leaves the transaction open.
    pub fn execute(&mut self) -> Result<Results> {
        self.ensure_open()?;
        let target = self
            .execute_uri
            .clone()
            .unwrap_or_else(|| self.begin_uri.clone());
        self.submit(&target)
    }

    /// Submit queued statements and commit.
    ///
    /// The transaction is finished afterwards, whether or not the commit
    /// succeeded.
    pub fn commit(&mut self) -> Result<Results> {
        let mut tx = Finalize(self);
        tx.ensure_open()?;
        let target = tx
            .commit_uri
            .clone()
            .unwrap_or_else(|| tx.begin_commit_uri.clone());
        tx.submit(&target)
    }

    /// Roll back the server-side transaction, if one was started.
    ///
    /// The outcome of the DELETE is ignored; the transaction is finished
    /// afterwards in every case.
    pub fn rollback(&mut self) -> Result<()> {
        let tx = Finalize(self);
        tx.ensure_open()?;
        if let Some(uri) = tx.execute_uri.as_deref() {
            debug!(uri = %uri, "rolling back transaction");
            if let Err(e) = tx.transport.delete(uri) {
                warn!(uri = %uri, error = %e, "rollback request failed; ignoring");
            }
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            return Err(Error::TransactionFinished);
        }
        Ok(())
    }

    /// Post every queued statement to `target` and decode the results.
    fn submit(&mut self, target: &str) -> Result<Results> {
        self.ensure_open()?;
        let body = encode_batch(&self.pending)?;
        debug!(uri = %target, statements = self.pending.len(), "submitting statements");

        let response = self.transport.post(target, body)?;
        if let Some(location) = response.location {
            self.execute_uri = Some(location);
        }
        let decoded = decode_response(&response.body)?;
        if let Some(commit) = decoded.commit.as_ref() {
            self.commit_uri = Some(commit.clone());
        }
        if let Some(expires) = decoded.transaction.as_ref().and_then(|t| t.expires.as_ref()) {
            self.expires = Some(expires.clone());
        }
        self.pending.clear();

        if let Some(first) = decoded.errors.first() {
            if decoded.errors.len() > 1 {
                debug!(
                    discarded = decoded.errors.len() - 1,
                    "reporting first statement error only"
                );
            }
            return Err(TransactionError::new(first.code.as_str(), first.message.clone()).into());
        }
        self.project(decoded)
    }

    fn project(&self, decoded: TransactionResponse) -> Result<Results> {
        decoded
            .results
            .iter()
            .map(|result| {
                let producer = RecordProducer::new(result.columns.clone());
                let width = producer.columns().len();
                result
                    .data
                    .iter()
                    .map(|row| -> Result<Record> {
                        let values = self.hydrator.hydrate_row(row, width)?;
                        Ok(producer.produce(values))
                    })
                    .collect::<Result<Vec<Record>>>()
            })
            .collect()
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("begin_uri", &self.begin_uri)
            .field("execute_uri", &self.execute_uri)
            .field("commit_uri", &self.commit_uri)
            .field("pending", &self.pending.len())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished {
            if let Some(uri) = self.execute_uri.as_deref() {
                warn!(uri = %uri, "transaction dropped while open on the server");
            }
        }
    }
}

/// Marks the transaction finished when it goes out of scope, on every
/// return path including early returns and unwinding.
struct Finalize<'a>(&'a mut Transaction);

impl Deref for Finalize<'_> {
    type Target = Transaction;

    fn deref(&self) -> &Transaction {
        &*self.0
    }
}

impl DerefMut for Finalize<'_> {
    fn deref_mut(&mut self) -> &mut Transaction {
        &mut *self.0
    }
}

impl Drop for Finalize<'_> {
    fn drop(&mut self) {
        self.0.finished = true;
    }
}
