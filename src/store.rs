use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

use crate::{
    entities::movie,
    error::AppResult,
    models::{MovieChanges, NewMovie},
};

/// Handle to the `movie` table. Cheap to clone; every clone shares the pool.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().filter(movie::Column::Name.eq(name)).all(&self.db).await?)
    }

    pub async fn insert(&self, id: i64, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Set(id),
            name: Set(new.name),
            imdb_rating: Set(new.imdb_rating),
            genre: Set(new.genre),
            actors: Set(new.actors),
            director: Set(new.director),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn update(
        &self,
        current: movie::Model,
        changes: MovieChanges,
    ) -> AppResult<movie::Model> {
        if changes.is_empty() {
            return Ok(current);
        }

        let mut model = current.into_active_model();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(rating) = changes.imdb_rating {
            model.imdb_rating = Set(rating);
        }
        if let Some(genre) = changes.genre {
            model.genre = Set(genre);
        }
        if let Some(actors) = changes.actors {
            model.actors = Set(actors);
        }
        if let Some(director) = changes.director {
            model.director = Set(director);
        }
        Ok(model.update(&self.db).await?)
    }

    /// Removes the row, returning whether one existed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use sea_orm::ConnectOptions;

    use super::*;
    use crate::error::AppError;

    pub(crate) async fn memory_store() -> MovieStore {
        // a single pooled connection keeps the in-memory database alive
        let options = ConnectOptions::new("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .to_owned();
        MovieStore::new(crate::db::connect_with(options).await.unwrap())
    }

    fn heat() -> NewMovie {
        NewMovie {
            name: "Heat".into(),
            imdb_rating: 8,
            genre: "Crime".into(),
            actors: "Al Pacino, Robert De Niro".into(),
            director: "Michael Mann".into(),
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = memory_store().await;
        let created = store.insert(7, heat()).await.unwrap();
        assert_eq!(created.id, 7);

        assert_eq!(store.find(7).await.unwrap(), Some(created.clone()));
        assert_eq!(store.find_by_name("Heat").await.unwrap(), vec![created]);
        assert!(store.find(8).await.unwrap().is_none());
        assert!(store.find_by_name("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unique_columns_reject_duplicates() {
        let store = memory_store().await;
        store.insert(1, heat()).await.unwrap();

        let same_id = NewMovie { name: "Thief".into(), ..heat() };
        assert!(matches!(store.insert(1, same_id).await, Err(AppError::Conflict(_))));
        assert!(matches!(store.insert(2, heat()).await, Err(AppError::Conflict(_))));
        assert!(store.find(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let store = memory_store().await;
        let created = store.insert(1, heat()).await.unwrap();

        let changes = MovieChanges { genre: Some("Drama".into()), ..MovieChanges::default() };
        let updated = store.update(created.clone(), changes).await.unwrap();
        assert_eq!(updated, movie::Model { genre: "Drama".into(), ..created });
        assert_eq!(store.find(1).await.unwrap(), Some(updated.clone()));

        let unchanged = store.update(updated.clone(), MovieChanges::default()).await.unwrap();
        assert_eq!(unchanged, updated);
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let store = memory_store().await;
        store.insert(1, heat()).await.unwrap();

        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
        assert!(store.find(1).await.unwrap().is_none());
    }
}
