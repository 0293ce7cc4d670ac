use crate::domain::ports::IdSource;
use crate::domain::transaction::{TRANSACTION_ID_LEN, TransactionId};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Uniform random ids over `[A-Z0-9]{16}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn next_id(&self) -> TransactionId {
        let mut rng = rand::thread_rng();
        let raw: String = (0..TRANSACTION_ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        TransactionId::from_generated(raw)
    }
}

/// Hands out a fixed script of ids, then falls back to random ones.
///
/// Lets callers force collisions deterministically.
#[derive(Debug, Default)]
pub struct ScriptedIdSource {
    script: Mutex<VecDeque<TransactionId>>,
}

impl ScriptedIdSource {
    pub fn new(ids: impl IntoIterator<Item = TransactionId>) -> Self {
        Self {
            script: Mutex::new(ids.into_iter().collect()),
        }
    }
}

impl IdSource for ScriptedIdSource {
    fn next_id(&self) -> TransactionId {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| RandomIdSource.next_id())
    }
}
