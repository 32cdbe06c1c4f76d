use std::sync::Arc;

/// Callback invoked with the new boolean connectivity on each transition.
pub type StatusCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Consolidated listener bookkeeping for the client.
///
/// Tracks the last published boolean so listeners only fire on true/false
/// transitions, not on every internal state move.
pub struct ClientState {
    listeners: Vec<(u64, StatusCallback)>,
    next_listener_id: u64,
    last_status: bool,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_listener_id: 0,
            last_status: false,
        }
    }

    pub fn add_listener(&mut self, callback: StatusCallback) -> u64 {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, callback));
        id
    }

    pub fn remove_listener(&mut self, id: u64) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Returns the callbacks to invoke if `connected` differs from the last
    /// published value, updating the record. The caller invokes them after
    /// releasing its lock.
    pub fn transition(&mut self, connected: bool) -> Option<Vec<StatusCallback>> {
        if connected == self.last_status {
            return None;
        }
        self.last_status = connected;
        Some(
            self.listeners
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect(),
        )
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_fires_only_on_boolean_change() {
        let mut state = ClientState::new();
        state.add_listener(Arc::new(|_| {}));

        assert!(state.transition(false).is_none());
        assert!(state.transition(true).is_some());
        assert!(state.transition(true).is_none());
        assert!(state.transition(false).is_some());
    }

    #[test]
    fn removed_listener_is_not_returned() {
        let mut state = ClientState::new();
        let id = state.add_listener(Arc::new(|_| {}));
        state.add_listener(Arc::new(|_| {}));

        state.remove_listener(id);

        let callbacks = state.transition(true).unwrap();
        assert_eq!(callbacks.len(), 1);
    }
}
