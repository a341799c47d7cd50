use crate::{EntryDraft, EntryId, FieldEdit, LedgerEntry};
use im_rc::Vector;

/// Ordered ledger entries of one session.
///
/// Holds no derived state; statements are recomputed from [`LedgerStore::iter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStore {
    entries: Vector<LedgerEntry>,
    /// Highest id ever handed out, removed entries included.
    last_id: EntryId,
    revision: u64,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self {
            entries: Vector::new(),
            last_id: 0,
            revision: 0,
        }
    }
}

impl LedgerStore {
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped by every mutation that changed the entries.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends a blank expense row and returns its id.
    pub fn add_row(&mut self) -> EntryId {
        self.append(EntryDraft::default())
    }

    pub fn update_field(&mut self, id: EntryId, edit: FieldEdit) {
        let changed = match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.apply(edit),
            None => {
                tracing::debug!(id, "update of unknown ledger entry");
                false
            }
        };
        if changed {
            self.revision += 1;
        }
    }

    pub fn remove_row(&mut self, id: EntryId) {
        if let Some(index) = self.entries.iter().position(|entry| entry.id == id) {
            self.entries.remove(index);
            self.revision += 1;
        }
    }

    /// Appends `drafts` in order under consecutive fresh ids.
    pub fn bulk_append<I>(&mut self, drafts: I) -> Vec<EntryId>
    where
        I: IntoIterator<Item = EntryDraft>,
    {
        drafts.into_iter().map(|draft| self.append(draft)).collect()
    }

    fn append(&mut self, draft: EntryDraft) -> EntryId {
        self.last_id += 1;
        let id = self.last_id;
        self.entries.push_back(draft.into_entry(id));
        self.revision += 1;
        id
    }
}
