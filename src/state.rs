use dashmap::DashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU16, Ordering},
};

use crate::pool::Mode;
use crate::rotation::Rotation;
use crate::server::{ADMIN_PORT, ADMIN_PORT_SECONDARY};

/// Process-wide content mode. Written only by the admin path, read by
/// every client handler once per request.
#[derive(Clone, Default)]
pub struct ModeController {
    proverb: Arc<AtomicBool>,
}

impl ModeController {
    pub fn current(&self) -> Mode {
        if self.proverb.load(Ordering::SeqCst) {
            Mode::Proverb
        } else {
            Mode::Joke
        }
    }

    /// Returns the mode that was active before the switch.
    pub fn set(&self, mode: Mode) -> Mode {
        let was_proverb = self.proverb.swap(mode == Mode::Proverb, Ordering::SeqCst);

        if was_proverb { Mode::Proverb } else { Mode::Joke }
    }
}

/// Per-client rotations, one table per mode. Entries are created on a
/// client's first request and kept for the process lifetime.
#[derive(Clone, Default)]
pub struct SessionStore {
    jokes: Arc<DashMap<String, Rotation>>,
    proverbs: Arc<DashMap<String, Rotation>>,
}

impl SessionStore {
    fn table(&self, mode: Mode) -> &DashMap<String, Rotation> {
        match mode {
            Mode::Joke => &self.jokes,
            Mode::Proverb => &self.proverbs,
        }
    }

    /// Fetch the client's current rotation, drawing one if the store
    /// has nothing for this id yet.
    pub fn get_or_create(&self, id: &str, mode: Mode) -> Rotation {
        *self
            .table(mode)
            .entry(id.to_string())
            .or_insert_with(Rotation::draw)
    }

    pub fn replace(&self, id: &str, mode: Mode, rotation: Rotation) {
        self.table(mode).insert(id.to_string(), rotation);
    }

    pub fn get(&self, id: &str, mode: Mode) -> Option<Rotation> {
        self.table(mode).get(id).map(|guard| *guard)
    }
}

/// Everything the connection handlers share.
#[derive(Clone)]
pub struct ServerState {
    pub sessions: SessionStore,
    pub mode: ModeController,
    admin_port: Arc<AtomicU16>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::default(),
            mode: ModeController::default(),
            admin_port: Arc::new(AtomicU16::new(ADMIN_PORT)),
        }
    }

    /// Which of the two well-known admin ports this server currently
    /// reports itself bound to.
    pub fn admin_port(&self) -> u16 {
        self.admin_port.load(Ordering::SeqCst)
    }

    /// Toggle the admin-port label. The admin serializes its own
    /// commands, so a plain load/store is enough here.
    pub fn switch_admin_port(&self) -> u16 {
        let next = if self.admin_port() == ADMIN_PORT {
            ADMIN_PORT_SECONDARY
        } else {
            ADMIN_PORT
        };

        self.admin_port.store(next, Ordering::SeqCst);
        next
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_joke_and_reports_previous() {
        let mode = ModeController::default();
        assert_eq!(mode.current(), Mode::Joke);

        assert_eq!(mode.set(Mode::Proverb), Mode::Joke);
        assert_eq!(mode.current(), Mode::Proverb);

        assert_eq!(mode.set(Mode::Proverb), Mode::Proverb);
        assert_eq!(mode.set(Mode::Joke), Mode::Proverb);
        assert_eq!(mode.current(), Mode::Joke);
    }

    #[test]
    fn get_or_create_is_stable_until_replaced() {
        let store = SessionStore::default();

        let first = store.get_or_create("abc", Mode::Joke);
        assert_eq!(store.get_or_create("abc", Mode::Joke), first);
        assert_eq!(store.get("abc", Mode::Joke), Some(first));

        let fresh = Rotation::draw();
        store.replace("abc", Mode::Joke, fresh);
        assert_eq!(store.get_or_create("abc", Mode::Joke), fresh);
    }

    #[test]
    fn joke_and_proverb_tables_are_independent() {
        let store = SessionStore::default();

        let jokes = store.get_or_create("abc", Mode::Joke);
        assert_eq!(store.get("abc", Mode::Proverb), None);

        store.replace("abc", Mode::Proverb, Rotation::draw());
        assert_eq!(store.get("abc", Mode::Joke), Some(jokes));
    }

    #[test]
    fn distinct_ids_never_share_rotations() {
        let store = SessionStore::default();

        std::thread::scope(|scope| {
            for i in 0..100 {
                let store = store.clone();
                scope.spawn(move || {
                    let id = format!("client-{i}");
                    let first = store.get_or_create(&id, Mode::Joke);

                    for _ in 0..10 {
                        assert_eq!(store.get_or_create(&id, Mode::Joke), first);
                    }
                });
            }
        });
    }

    #[test]
    fn admin_port_label_toggles_between_the_pair() {
        let state = ServerState::new();
        assert_eq!(state.admin_port(), ADMIN_PORT);
        assert_eq!(state.switch_admin_port(), ADMIN_PORT_SECONDARY);
        assert_eq!(state.switch_admin_port(), ADMIN_PORT);
    }
}
