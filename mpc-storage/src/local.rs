//! In-process storage backend.
//!
//! Backs every session with a mutex-guarded map and hands out one
//! [`LocalSession`] per party. Intended for tests and single-machine
//! deployments where the parties run as threads of one process.

use std::collections::HashMap;
use std::sync::Arc;

use num_bigint::BigUint;
use parking_lot::Mutex;

use crate::{RevealKey, SessionId, SharedStorage};

#[derive(Default)]
struct SessionState {
    online: Vec<bool>,
    completed: Vec<bool>,
    fields: HashMap<RevealKey, Vec<Option<Vec<BigUint>>>>,
    bits: HashMap<RevealKey, Vec<Option<Vec<bool>>>>,
    inputs: HashMap<(u64, usize), BigUint>,
}

impl SessionState {
    fn new(num_parties: usize) -> Self {
        Self {
            online: vec![false; num_parties],
            completed: vec![false; num_parties],
            ..Default::default()
        }
    }
}

/// Registry of all sessions hosted by this process.
#[derive(Default, Clone)]
pub struct LocalStore {
    sessions: Arc<Mutex<HashMap<SessionId, Arc<Mutex<SessionState>>>>>,
}

impl LocalStore {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this party's handle to `session`, creating the session on
    /// first use. All parties of a session must pass the same party count.
    pub fn session(&self, session: SessionId, num_parties: usize) -> LocalSession {
        let state = Arc::clone(
            self.sessions
                .lock()
                .entry(session)
                .or_insert_with(|| Arc::new(Mutex::new(SessionState::new(num_parties)))),
        );
        assert_eq!(
            state.lock().online.len(),
            num_parties,
            "session {session} was registered with a different party count"
        );
        LocalSession {
            registry: self.sessions.clone(),
            state,
            session,
            num_parties,
        }
    }
}

/// One party's handle to a session hosted by a [`LocalStore`].
#[derive(Clone)]
pub struct LocalSession {
    registry: Arc<Mutex<HashMap<SessionId, Arc<Mutex<SessionState>>>>>,
    state: Arc<Mutex<SessionState>>,
    session: SessionId,
    num_parties: usize,
}

impl SharedStorage for LocalSession {
    fn session_id(&self) -> SessionId {
        self.session
    }

    fn num_parties(&self) -> usize {
        self.num_parties
    }

    fn announce_online(&self, party: usize) {
        self.state.lock().online[party] = true;
    }

    fn online_parties(&self) -> Vec<bool> {
        self.state.lock().online.clone()
    }

    fn announce_completed(&self, party: usize) {
        self.state.lock().completed[party] = true;
    }

    fn completed_parties(&self) -> Vec<bool> {
        self.state.lock().completed.clone()
    }

    fn post_field_shares(&self, key: RevealKey, sender: usize, shares: Vec<BigUint>) {
        let mut state = self.state.lock();
        let n = self.num_parties;
        let slot = &mut state.fields.entry(key).or_insert_with(|| vec![None; n])[sender];
        debug_assert!(slot.is_none(), "duplicate field post for {key} by {sender}");
        *slot = Some(shares);
    }

    fn collect_field_shares(&self, key: RevealKey) -> Option<Vec<Vec<BigUint>>> {
        let state = self.state.lock();
        let slots = state.fields.get(&key)?;
        slots.iter().cloned().collect()
    }

    fn post_bit_shares(&self, key: RevealKey, sender: usize, shares: Vec<bool>) {
        let mut state = self.state.lock();
        let n = self.num_parties;
        let slot = &mut state.bits.entry(key).or_insert_with(|| vec![None; n])[sender];
        debug_assert!(slot.is_none(), "duplicate bit post for {key} by {sender}");
        *slot = Some(shares);
    }

    fn collect_bit_shares(&self, key: RevealKey) -> Option<Vec<Vec<bool>>> {
        let state = self.state.lock();
        let slots = state.bits.get(&key)?;
        slots.iter().cloned().collect()
    }

    fn post_input_share(&self, wire: u64, _sender: usize, receiver: usize, share: BigUint) {
        self.state.lock().inputs.insert((wire, receiver), share);
    }

    fn fetch_input_share(&self, wire: u64, receiver: usize) -> Option<BigUint> {
        self.state.lock().inputs.get(&(wire, receiver)).cloned()
    }

    fn retire(&self) {
        self.registry.lock().remove(&self.session);
    }
}
