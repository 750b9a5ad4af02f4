//! In-memory EntityStore implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use opsboard_core::store::{EntityStore, StoreError};
use opsboard_core::types::{Entity, EntityId, Person, Project, Task};

/// One keyed table per entity kind.
///
/// Records live in a map; a separate index keeps insertion order so `list`
/// is deterministic. Mutations do not reorder, and a deleted id leaves both
/// structures for good.
struct Table<E: Entity> {
    records: RwLock<HashMap<EntityId, E>>,
    order: RwLock<Vec<EntityId>>,
}

impl<E: Entity> Table<E> {
    fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
        }
    }

    fn create(&self, input: E::Create) -> Result<E, StoreError> {
        let entity = E::new(input);
        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let mut order = self
            .order
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        order.push(entity.id().clone());
        records.insert(entity.id().clone(), entity.clone());
        Ok(entity)
    }

    fn list(&self) -> Result<Vec<E>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let order = self
            .order
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        Ok(order
            .iter()
            .filter_map(|id| records.get(id))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> Result<Option<E>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(records.get(id).cloned())
    }

    fn mutate(
        &self,
        id: &str,
        apply: impl FnOnce(&mut E),
    ) -> Result<E, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        match records.get_mut(id) {
            Some(entity) => {
                apply(entity);
                Ok(entity.clone())
            }
            None => Err(StoreError::NotFound(format!("{} {}", E::KIND, id))),
        }
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        if records.remove(id).is_some() {
            let mut order = self
                .order
                .write()
                .map_err(|e| StoreError::Internal(e.to_string()))?;
            order.retain(|existing| existing != id);
        }
        Ok(())
    }
}

/// In-memory backend for all three entity kinds.
///
/// One instance owns all records; callers only ever receive clones. State does
/// not survive the process. Intended for development, tests, and as the
/// reference implementation of the contract.
pub struct InMemoryStore {
    people: Table<Person>,
    projects: Table<Project>,
    tasks: Table<Task>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            people: Table::new(),
            projects: Table::new(),
            tasks: Table::new(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

trait HasTable<E: Entity> {
    fn table(&self) -> &Table<E>;
}

impl HasTable<Person> for InMemoryStore {
    fn table(&self) -> &Table<Person> {
        &self.people
    }
}

impl HasTable<Project> for InMemoryStore {
    fn table(&self) -> &Table<Project> {
        &self.projects
    }
}

impl HasTable<Task> for InMemoryStore {
    fn table(&self) -> &Table<Task> {
        &self.tasks
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for InMemoryStore
where
    InMemoryStore: HasTable<E>,
{
    async fn create(&self, input: E::Create) -> Result<E, StoreError> {
        self.table().create(input)
    }

    async fn list(&self) -> Result<Vec<E>, StoreError> {
        self.table().list()
    }

    async fn get(&self, id: &str) -> Result<Option<E>, StoreError> {
        self.table().get(id)
    }

    async fn update(&self, id: &str, input: E::Update) -> Result<E, StoreError> {
        self.table().mutate(id, |entity| entity.apply_update(input))
    }

    async fn patch(&self, id: &str, patch: E::Patch) -> Result<E, StoreError> {
        self.table().mutate(id, |entity| entity.apply_patch(patch))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.table().delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsboard_core::types::{
        CreatePersonInput, CreateProjectInput, CreateTaskInput, PersonPatch, TaskStatus,
        UpdatePersonInput,
    };

    fn person_input(name: &str) -> CreatePersonInput {
        CreatePersonInput {
            name: name.to_string(),
            email: None,
        }
    }

    fn task_input(title: &str) -> CreateTaskInput {
        CreateTaskInput {
            title: title.to_string(),
            description: None,
            status: None,
            project_id: None,
            assignee_id: None,
        }
    }

    #[test]
    fn test_create_then_get_round_trips() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let created: Person = store.create(person_input("Ada")).await.unwrap();

            let fetched = store.get(&created.id).await.unwrap();
            assert_eq!(fetched, Some(created));
        });
    }

    #[test]
    fn test_create_mints_unique_ids() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let a: Person = store.create(person_input("A")).await.unwrap();
            let b: Person = store.create(person_input("B")).await.unwrap();
            assert_ne!(a.id, b.id);
            assert_eq!(a.created_at, a.updated_at);
        });
    }

    #[test]
    fn test_list_is_insertion_ordered_snapshot() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            for name in ["A", "B", "C"] {
                let _: Person = store.create(person_input(name)).await.unwrap();
            }

            let mut listed: Vec<Person> = store.list().await.unwrap();
            let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["A", "B", "C"]);

            // The snapshot is independent of the store.
            listed.clear();
            let again: Vec<Person> = store.list().await.unwrap();
            assert_eq!(again.len(), 3);
        });
    }

    #[test]
    fn test_update_replaces_and_patch_merges() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let created: Person = store
                .create(CreatePersonInput {
                    name: "Ada".to_string(),
                    email: None,
                })
                .await
                .unwrap();

            let updated: Person = store
                .update(
                    &created.id,
                    UpdatePersonInput {
                        name: "Ada L".to_string(),
                        email: Some("a@x.io".to_string()),
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.name, "Ada L");
            assert_eq!(updated.email.as_deref(), Some("a@x.io"));

            let patched: Person = store
                .patch(&created.id, PersonPatch::default())
                .await
                .unwrap();
            assert_eq!(patched.name, "Ada L");
            assert_eq!(patched.email.as_deref(), Some("a@x.io"));
            assert!(patched.updated_at >= updated.updated_at);
        });
    }

    #[test]
    fn test_update_and_patch_unknown_id_report_not_found() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();

            let update: Result<Person, _> = store
                .update(
                    "missing",
                    UpdatePersonInput {
                        name: "X".to_string(),
                        email: None,
                    },
                )
                .await;
            assert!(matches!(update, Err(StoreError::NotFound(_))));

            let patch: Result<Person, _> = store.patch("missing", PersonPatch::default()).await;
            assert!(matches!(patch, Err(StoreError::NotFound(_))));
        });
    }

    #[test]
    fn test_delete_is_idempotent_and_final() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let created: Person = store.create(person_input("Ada")).await.unwrap();

            EntityStore::<Person>::delete(&store, &created.id)
                .await
                .unwrap();
            assert_eq!(store.get(&created.id).await.unwrap(), None::<Person>);

            // Second delete of the same id is still Ok.
            EntityStore::<Person>::delete(&store, &created.id)
                .await
                .unwrap();

            // The id stays dead for update/patch.
            let update: Result<Person, _> = store
                .update(
                    &created.id,
                    UpdatePersonInput {
                        name: "Ghost".to_string(),
                        email: None,
                    },
                )
                .await;
            assert!(matches!(update, Err(StoreError::NotFound(_))));
        });
    }

    #[test]
    fn test_entity_kinds_are_isolated() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let _: Person = store.create(person_input("Ada")).await.unwrap();
            let _: Project = store
                .create(CreateProjectInput {
                    name: "Apollo".to_string(),
                    description: None,
                    owner_id: None,
                })
                .await
                .unwrap();
            let task: Task = store.create(task_input("T")).await.unwrap();

            let people: Vec<Person> = store.list().await.unwrap();
            let projects: Vec<Project> = store.list().await.unwrap();
            let tasks: Vec<Task> = store.list().await.unwrap();
            assert_eq!(people.len(), 1);
            assert_eq!(projects.len(), 1);
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].status, TaskStatus::Todo);

            // Deleting a task leaves the other kinds alone.
            EntityStore::<Task>::delete(&store, &task.id).await.unwrap();
            let people: Vec<Person> = store.list().await.unwrap();
            assert_eq!(people.len(), 1);
        });
    }
}
