use sea_orm::{DatabaseConnection, EntityTrait, Set, SqlErr};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
};

/// A rated movie about to be persisted. Callers validate the rating
/// before constructing one.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub id: i32,
    pub title: String,
    pub year: Option<String>,
    pub poster_path: Option<String>,
    pub rating: i32,
}

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a rated movie. Re-adding an id that is already stored
    /// fails with [`AppError::DuplicateMovie`] rather than overwriting.
    pub async fn add(&self, new: NewMovie) -> AppResult<()> {
        let model = movie::ActiveModel {
            id: Set(new.id),
            title: Set(new.title),
            year: Set(new.year),
            poster_path: Set(new.poster_path),
            rating: Set(new.rating),
        };

        if let Err(err) = movie::Entity::insert(model).exec(&self.db).await {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(AppError::DuplicateMovie);
            }
            return Err(err.into());
        }

        Ok(())
    }

    /// Every persisted movie, in rowid order. No sort key is applied,
    /// so the order is stable between calls as long as nothing writes.
    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().all(&self.db).await?)
    }
}
