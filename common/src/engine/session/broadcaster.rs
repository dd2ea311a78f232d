use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::games::snake::GameSnapshot;

/// Render-side sink for snapshots. Implementations must not block the
/// session task for longer than a frame.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}

/// Publishes the latest snapshot on a watch channel; readers always see the
/// newest frame and never hold the game state.
#[derive(Clone)]
pub struct WatchBroadcaster {
    tx: Arc<watch::Sender<Option<GameSnapshot>>>,
}

impl WatchBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<GameSnapshot>> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> Option<GameSnapshot> {
        self.tx.borrow().clone()
    }
}

impl Default for WatchBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBroadcaster for WatchBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        self.tx.send_replace(Some(snapshot));
    }

    async fn broadcast_game_over(&self, snapshot: GameSnapshot) {
        self.tx.send_replace(Some(snapshot));
    }
}
