//! Qdrant-backed FAQ index.

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeleteCollectionBuilder, Distance, Filter, PointStruct,
    ScoredPoint, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use std::collections::HashMap;
use std::str::FromStr;

use crate::constants::{FAQ_COLLECTION_NAME, PAYLOAD_ANSWER, PAYLOAD_LANG, PAYLOAD_QUESTION};
use crate::corpus::{FaqEntry, LanguageCode};

use super::error::RetrievalError;
use super::{FaqIndex, FaqPoint, IndexHit};

/// Qdrant client wrapper storing one point per `(language, question)` pair.
///
/// The whole corpus lives in a single collection; language separation happens
/// through a payload filter at query time, so one embedding space serves all
/// languages.
#[derive(Clone)]
pub struct QdrantFaqIndex {
    client: Qdrant,
    url: String,
    collection: String,
}

impl std::fmt::Debug for QdrantFaqIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantFaqIndex")
            .field("url", &self.url)
            .field("collection", &self.collection)
            .finish()
    }
}

impl QdrantFaqIndex {
    /// Connects to Qdrant at `url`, using the default collection name.
    pub fn new(url: &str) -> Result<Self, RetrievalError> {
        Self::with_collection(url, FAQ_COLLECTION_NAME)
    }

    pub fn with_collection(url: &str, collection: &str) -> Result<Self, RetrievalError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| RetrievalError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Basic connectivity probe.
    pub async fn health_check(&self) -> Result<(), RetrievalError> {
        self.client
            .health_check()
            .await
            .map_err(|e| RetrievalError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn create_collection(&self, vector_size: u64) -> Result<(), RetrievalError> {
        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| RetrievalError::CollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    fn to_point_struct(point: FaqPoint) -> PointStruct {
        let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
        payload.insert(
            PAYLOAD_LANG.to_string(),
            point.entry.language.as_str().into(),
        );
        payload.insert(PAYLOAD_QUESTION.to_string(), point.entry.question.into());
        payload.insert(PAYLOAD_ANSWER.to_string(), point.entry.answer.into());

        PointStruct::new(point.id, point.vector, payload)
    }

    fn hit_from_scored_point(point: ScoredPoint) -> Result<IndexHit, RetrievalError> {
        let payload = point.payload;

        let field = |name: &str| -> Result<String, RetrievalError> {
            payload
                .get(name)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .ok_or_else(|| RetrievalError::MalformedPoint {
                    reason: format!("missing payload field '{name}'"),
                })
        };

        let language = LanguageCode::from_str(&field(PAYLOAD_LANG)?).map_err(|e| {
            RetrievalError::MalformedPoint {
                reason: e.to_string(),
            }
        })?;

        Ok(IndexHit {
            entry: FaqEntry {
                question: field(PAYLOAD_QUESTION)?,
                language,
                answer: field(PAYLOAD_ANSWER)?,
            },
            similarity: point.score,
        })
    }
}

impl FaqIndex for QdrantFaqIndex {
    async fn ensure_collection(&self, vector_size: u64) -> Result<(), RetrievalError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| RetrievalError::CollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            self.create_collection(vector_size).await?;
        }

        Ok(())
    }

    async fn rebuild(
        &self,
        points: Vec<FaqPoint>,
        vector_size: u64,
    ) -> Result<(), RetrievalError> {
        // Drop-and-recreate replaces the whole corpus atomically enough for a
        // curated FAQ: stale entries cannot survive a reload.
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| RetrievalError::CollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if exists {
            self.client
                .delete_collection(DeleteCollectionBuilder::new(&self.collection))
                .await
                .map_err(|e| RetrievalError::CollectionFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;
        }

        self.create_collection(vector_size).await?;

        if points.is_empty() {
            return Ok(());
        }

        let qdrant_points: Vec<PointStruct> =
            points.into_iter().map(Self::to_point_struct).collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, qdrant_points).wait(true))
            .await
            .map_err(|e| RetrievalError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn search(
        &self,
        vector: Vec<f32>,
        language: LanguageCode,
        limit: u64,
    ) -> Result<Vec<IndexHit>, RetrievalError> {
        let filter = Filter::must([Condition::matches(
            PAYLOAD_LANG,
            language.as_str().to_string(),
        )]);

        let search = SearchPointsBuilder::new(&self.collection, vector, limit)
            .filter(filter)
            .with_payload(true);

        let response = self
            .client
            .search_points(search)
            .await
            .map_err(|e| RetrievalError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        response
            .result
            .into_iter()
            .map(Self::hit_from_scored_point)
            .collect()
    }
}
