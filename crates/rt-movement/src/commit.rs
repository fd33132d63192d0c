//! Staged changes: persist everything first, then apply in memory.
//!
//! An operation builds the full list of updated entities up front, leaving
//! the scheduler untouched.  [`MovementScheduler::commit`] then writes the
//! list to the store in order.  If one write fails, the writes before it are
//! undone by re-persisting the in-memory (still unchanged) entities, and the
//! in-memory state is left as it was.  Only when every write succeeded are
//! the changes applied in memory, in the same order.

use log::error;

use rt_station::Station;
use rt_track::Block;

use crate::{MovementResult, MovementScheduler, Persistence, StoreResult, TickDriver, Train};

/// One updated entity.
#[derive(Debug, Clone)]
pub(crate) enum Change {
    Block(Block),
    Station(Station),
    Train(Train),
}

impl<P: Persistence, D: TickDriver> MovementScheduler<P, D> {
    pub(crate) fn commit(&mut self, changes: Vec<Change>) -> MovementResult<()> {
        for (i, change) in changes.iter().enumerate() {
            if let Err(e) = self.persist(change) {
                self.rollback(&changes[..i]);
                return Err(e.into());
            }
        }
        for change in changes {
            self.apply(change);
        }
        Ok(())
    }

    fn persist(&mut self, change: &Change) -> StoreResult<()> {
        match change {
            Change::Block(block) => self.store.persist_block(block),
            Change::Station(station) => self.store.persist_station(station),
            Change::Train(train) => self.store.persist_train(train),
        }
    }

    /// Re-persist the in-memory version of each already-written entity,
    /// newest first.
    fn rollback(&mut self, written: &[Change]) {
        for change in written.iter().rev() {
            let original = match change {
                Change::Block(b) => self.graph.block(b.id).ok().cloned().map(Change::Block),
                Change::Station(s) => self.stations.get(s.id).ok().cloned().map(Change::Station),
                Change::Train(t) => self.trains.get(t.id).ok().cloned().map(Change::Train),
            };
            let Some(original) = original else { continue };
            if let Err(e) = self.persist(&original) {
                error!("rollback of {original:?} failed, store and memory now differ: {e}");
            }
        }
    }

    fn apply(&mut self, change: Change) {
        match change {
            Change::Block(block) => {
                if let Err(e) = self.graph.set_occupant(block.id, block.occupant) {
                    error!("committed block vanished from the graph: {e}");
                }
            }
            Change::Station(station) => {
                if let Err(e) = self.stations.replace(station) {
                    error!("committed station vanished from the registry: {e}");
                }
            }
            Change::Train(train) => {
                self.trains.insert(train);
            }
        }
    }
}
