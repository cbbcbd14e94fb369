use crate::error::ServiceError;
use crate::models::{DocumentStore, FindQuery, Record};
use garden_core::{
    time, Command, Document, Garden, LogEntry, ParentRef, Patch, Pod, PodUpdate, TimeWindow,
    NOT_EXECUTED,
};
use std::sync::Arc;
use tracing::{debug, info};

const EMPTY_WINDOW: &str = "No records were found within the time period";
const PODS_FIELD: &str = "pods";

/// Resource operations shared by every collection.
/// Cheap to clone, all clones operate on the same store.
#[derive(Clone)]
pub struct Controller {
    store: Arc<DocumentStore>,
}

impl Controller {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Controller { store }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    #[tracing::instrument(skip(self, doc), fields(collection = D::COLLECTION))]
    pub async fn create<D: Document>(&self, mut doc: D) -> Result<D, ServiceError> {
        if let Some(parent) = doc.parent() {
            self.ensure_exists(parent).await?;
        }

        doc.set_updated_at(time::now());
        let record = Record::from_document(&doc)?;
        self.store.insert(D::COLLECTION, record).await?;
        info!(collection = D::COLLECTION, id = doc.id(), "Created document");

        self.get(doc.id()).await
    }

    #[tracing::instrument(skip(self), fields(collection = D::COLLECTION))]
    pub async fn get<D: Document>(&self, id: &str) -> Result<D, ServiceError> {
        match self.store.find_one(D::COLLECTION, id).await? {
            Some(body) => Ok(serde_json::from_value(body)?),
            None => Err(ServiceError::not_found(D::KIND, id)),
        }
    }

    #[tracing::instrument(skip(self), fields(collection = D::COLLECTION))]
    pub async fn list<D: Document>(&self, limit: usize) -> Result<Vec<D>, ServiceError> {
        self.find(&FindQuery::all().limit(limit)).await
    }

    #[tracing::instrument(skip(self, patch), fields(collection = D::COLLECTION))]
    pub async fn update<D, P>(&self, id: &str, patch: P) -> Result<D, ServiceError>
    where
        D: Document,
        P: Patch<D> + Send,
    {
        let mut doc: D = self.get(id).await?;
        if patch.is_empty() {
            debug!(collection = D::COLLECTION, id, "Empty update, nothing to merge");
            return Ok(doc);
        }

        patch.apply(&mut doc);
        self.replace(doc).await
    }

    #[tracing::instrument(skip(self), fields(collection = D::COLLECTION))]
    pub async fn delete<D: Document>(&self, id: &str) -> Result<(), ServiceError> {
        if !self.store.delete(D::COLLECTION, id).await? {
            return Err(ServiceError::not_found(D::KIND, id));
        }
        info!(collection = D::COLLECTION, id, "Deleted document");
        Ok(())
    }

    /// Entries created within `window`, optionally restricted to one sensor or actuator
    #[tracing::instrument(skip(self), fields(collection = D::COLLECTION))]
    pub async fn window<D: LogEntry>(
        &self,
        parent_id: Option<&str>,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<D>, ServiceError> {
        let mut query = FindQuery::all().created_within(window).limit(limit);
        if let Some(parent_id) = parent_id {
            query = query.field(D::PARENT_FIELD, parent_id);
        }

        let entries = self.find(&query).await?;
        if entries.is_empty() {
            return Err(ServiceError::EmptyWindow(EMPTY_WINDOW.to_owned()));
        }
        Ok(entries)
    }

    pub async fn pods(&self, garden_id: &str) -> Result<Vec<Pod>, ServiceError> {
        let garden: Garden = self.get(garden_id).await?;
        Ok(garden.pods().to_vec())
    }

    /// Appends `pod` to the garden it names, returns the updated garden
    #[tracing::instrument(skip(self, pod), fields(collection = Garden::COLLECTION))]
    pub async fn add_pod(&self, mut pod: Pod) -> Result<Garden, ServiceError> {
        let mut garden: Garden = self.get(&pod.garden_id).await?;

        pod.updated_at = time::now();
        info!(garden_id = %garden.id, pod_id = %pod.id, "Adding pod");
        garden.push_pod(pod);
        self.replace(garden).await
    }

    /// Merges `patch` into the embedded pod with id `pod_id`, returns the owning garden
    #[tracing::instrument(skip(self, patch), fields(collection = Garden::COLLECTION))]
    pub async fn update_pod(&self, pod_id: &str, patch: PodUpdate) -> Result<Garden, ServiceError> {
        let pod_not_found = || ServiceError::not_found("Pod", pod_id);
        let body = self
            .store
            .find_containing(Garden::COLLECTION, PODS_FIELD, pod_id)
            .await?
            .ok_or_else(pod_not_found)?;
        let mut garden: Garden = serde_json::from_value(body)?;
        if patch.is_empty() {
            return Ok(garden);
        }

        let pod = garden.pod_mut(pod_id).ok_or_else(pod_not_found)?;
        patch.apply(pod);
        pod.updated_at = time::advance(pod.updated_at);
        self.replace(garden).await
    }

    pub async fn create_commands(&self, commands: Vec<Command>) -> Result<Vec<Command>, ServiceError> {
        let mut created = Vec::with_capacity(commands.len());
        for command in commands {
            created.push(self.create(command).await?);
        }
        Ok(created)
    }

    /// Commands whose `executed` flag equals `executed`, pending ones by default
    pub async fn list_commands(
        &self,
        executed: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Command>, ServiceError> {
        let executed = executed.unwrap_or(NOT_EXECUTED);
        let query = FindQuery::all().field("executed", executed).limit(limit);
        self.find(&query).await
    }

    async fn find<D: Document>(&self, query: &FindQuery) -> Result<Vec<D>, ServiceError> {
        let bodies = self.store.find(D::COLLECTION, query).await?;
        let docs = bodies
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<D>, _>>()?;
        Ok(docs)
    }

    /// Writes back a modified document and returns the stored version
    async fn replace<D: Document>(&self, mut doc: D) -> Result<D, ServiceError> {
        doc.set_updated_at(time::advance(doc.updated_at()));
        let record = Record::from_document(&doc)?;
        if !self.store.replace(D::COLLECTION, record).await? {
            return Err(ServiceError::not_found(D::KIND, doc.id()));
        }
        info!(collection = D::COLLECTION, id = doc.id(), "Updated document");

        self.get(doc.id()).await
    }

    async fn ensure_exists(&self, parent: ParentRef<'_>) -> Result<(), ServiceError> {
        match self.store.find_one(parent.collection, parent.id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found(parent.kind, parent.id)),
        }
    }
}

#[cfg(test)]
mod test;
