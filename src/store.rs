use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{Movie, MoviePatch, NewMovie},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<Movie> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        let inserted = model.insert(&self.db).await.map_err(|err| match AppError::from(err) {
            AppError::ConstraintViolation(_) => {
                AppError::ConstraintViolation(format!("\"{title}\" is already in your list"))
            },
            other => other,
        })?;

        debug!(id = inserted.id, title = %inserted.title, "created movie");
        Ok(inserted.into())
    }

    pub async fn read(&self, id: i32) -> AppResult<Movie> {
        let found = movie::Entity::find_by_id(id).one(&self.db).await?;
        found.map(Movie::from).ok_or(AppError::NotFound)
    }

    /// All movies, lowest rating first. Unrated movies sort before rated
    /// ones and ties keep insertion order.
    pub async fn list(&self) -> AppResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by_asc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn update(&self, id: i32, patch: MoviePatch) -> AppResult<Movie> {
        let existing =
            movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound)?;
        if patch == MoviePatch::default() {
            return Ok(existing.into());
        }

        let mut model: movie::ActiveModel = existing.into();
        if let Some(rating) = patch.rating {
            model.rating = Set(Some(rating));
        }
        if let Some(review) = patch.review {
            model.review = Set(Some(review));
        }

        // The row can vanish between the read and the write.
        let updated = model.update(&self.db).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => AppError::NotFound,
            err => err.into(),
        })?;
        debug!(id = updated.id, rating = ?updated.rating, "updated movie");
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        debug!(id = id, "deleted movie");
        Ok(())
    }

    /// Writes every movie's `ranking` in a single transaction.
    pub async fn persist_rankings(&self, movies: &[Movie]) -> AppResult<()> {
        let txn = self.db.begin().await?;

        for m in movies {
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(m.ranking))
                .filter(movie::Column::Id.eq(m.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        debug!(count = movies.len(), "persisted rankings");
        Ok(())
    }
}
