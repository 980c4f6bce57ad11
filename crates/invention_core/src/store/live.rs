//! Repository wrapper with change subscriptions.

use crate::model::invention::{Invention, InventionId};
use crate::repo::invention_repo::{InventionListQuery, InventionRepository, RepoResult};
use log::debug;
use std::sync::mpsc::{self, Receiver, Sender};

/// Kind of mutation that produced a [`StoreChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Notification published after a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    pub id: InventionId,
    pub revision: u64,
}

/// Invention store with explicit change notifications.
///
/// Every mutating call commits through the repository before returning, so
/// there is no separate pending state to flush.
pub struct InventionStore<R: InventionRepository> {
    repo: R,
    subscribers: Vec<Sender<StoreChange>>,
    revision: u64,
}

impl<R: InventionRepository> InventionStore<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            subscribers: Vec::new(),
            revision: 0,
        }
    }

    /// Registers a new subscriber.
    ///
    /// Dropping the receiver unsubscribes; the sender is pruned on the next
    /// publish.
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Revision of the last published change; `0` before any mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Persists `invention` as a new record.
    pub fn create(&mut self, invention: Invention) -> RepoResult<Invention> {
        let id = self.repo.create_invention(&invention)?;
        self.publish(ChangeKind::Created, id);
        Ok(invention)
    }

    /// Replaces the editable fields of an existing record.
    pub fn update(&mut self, invention: &Invention) -> RepoResult<()> {
        self.repo.update_invention(invention)?;
        self.publish(ChangeKind::Updated, invention.id);
        Ok(())
    }

    pub fn delete(&mut self, id: InventionId) -> RepoResult<()> {
        self.repo.delete_invention(id)?;
        self.publish(ChangeKind::Deleted, id);
        Ok(())
    }

    pub fn get(&self, id: InventionId) -> RepoResult<Option<Invention>> {
        self.repo.get_invention(id)
    }

    /// Returns all records in the requested order.
    pub fn snapshot(&self, query: &InventionListQuery) -> RepoResult<Vec<Invention>> {
        self.repo.list_inventions(query)
    }

    fn publish(&mut self, kind: ChangeKind, id: InventionId) {
        self.revision += 1;
        let change = StoreChange {
            kind,
            id,
            revision: self.revision,
        };
        self.subscribers.retain(|tx| tx.send(change).is_ok());
        debug!(
            "event=store_publish module=store kind={:?} revision={} subscribers={}",
            kind,
            self.revision,
            self.subscribers.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeKind, InventionStore};
    use crate::db::open_db_in_memory;
    use crate::model::invention::Invention;
    use crate::repo::invention_repo::{InventionListQuery, SqliteInventionRepository};

    #[test]
    fn each_commit_publishes_one_change() {
        let conn = open_db_in_memory().unwrap();
        let mut store = InventionStore::new(SqliteInventionRepository::try_new(&conn).unwrap());
        let rx = store.subscribe();

        let mut created = store.create(Invention::new_default()).unwrap();
        created.title = Some("Phonograph".to_string());
        store.update(&created).unwrap();
        store.delete(created.id).unwrap();

        let kinds = rx.try_iter().map(|change| change.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![ChangeKind::Created, ChangeKind::Updated, ChangeKind::Deleted]
        );
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn failed_commit_publishes_nothing() {
        let conn = open_db_in_memory().unwrap();
        let mut store = InventionStore::new(SqliteInventionRepository::try_new(&conn).unwrap());
        let rx = store.subscribe();

        let missing = Invention::new_default();
        assert!(store.delete(missing.id).is_err());
        assert!(rx.try_recv().is_err());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let conn = open_db_in_memory().unwrap();
        let mut store = InventionStore::new(SqliteInventionRepository::try_new(&conn).unwrap());
        let kept = store.subscribe();
        drop(store.subscribe());
        assert_eq!(store.subscriber_count(), 2);

        store.create(Invention::new_default()).unwrap();
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(kept.try_iter().count(), 1);
        assert_eq!(
            store.snapshot(&InventionListQuery::default()).unwrap().len(),
            1
        );
    }
}
