use crate::catalog::query::{FileQuery, Filter};
use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::files::{FileCreateDBRequest, FileDBResponse, FileUpdateDBRequest},
};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;

const FILE_COLUMNS: &str = "id, name, size, tags, created_at, updated_at";

pub struct Files<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Files<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

/// Append ` WHERE ...` for `filter`, or nothing when there is no filter.
fn push_where(builder: &mut QueryBuilder<'_, Postgres>, filter: Option<&Filter>) {
    if let Some(filter) = filter {
        builder.push(" WHERE ");
        push_filter(builder, filter);
    }
}

/// Compile a filter tree into SQL. Every value is bound, never interpolated.
///
/// Tags are matched with `= ANY(tags)`, one predicate per tag, so matching is on
/// whole array elements rather than substrings.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::Tag(tag) => {
            builder.push_bind(tag.clone());
            builder.push(" = ANY(tags)");
        }
        Filter::NameContains(fragment) => {
            builder.push("strpos(name, ");
            builder.push_bind(fragment.clone());
            builder.push(") > 0");
        }
        Filter::All(filters) if filters.is_empty() => {
            builder.push("TRUE");
        }
        Filter::All(filters) => {
            builder.push("(");
            for (i, child) in filters.iter().enumerate() {
                if i > 0 {
                    builder.push(" AND ");
                }
                push_filter(builder, child);
            }
            builder.push(")");
        }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Files<'c> {
    type CreateRequest = FileCreateDBRequest;
    type UpdateRequest = FileUpdateDBRequest;
    type Response = FileDBResponse;
    type Id = str;
    type Filter = FileQuery;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let file = sqlx::query_as::<_, FileDBResponse>(
            r#"
            INSERT INTO files (name, size, tags)
            VALUES ($1, $2, $3)
            RETURNING id, name, size, tags, created_at, updated_at
            "#,
        )
        .bind(&request.name)
        .bind(request.size)
        .bind(&request.tags)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(file)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: &Self::Id) -> Result<Option<Self::Response>> {
        let file = sqlx::query_as::<_, FileDBResponse>(&format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(file)
    }

    #[instrument(skip(self), err)]
    async fn exists(&mut self, id: &Self::Id) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM files WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(exists)
    }

    #[instrument(skip(self, filter), fields(page = filter.page.page, size = filter.page.size), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {FILE_COLUMNS} FROM files"));
        push_where(&mut query, filter.filter.as_ref());
        query.push(" ORDER BY created_at ASC, id ASC LIMIT ");
        query.push_bind(filter.page.size);
        query.push(" OFFSET ");
        query.push_bind(filter.page.offset());

        let files = query.build_query_as::<FileDBResponse>().fetch_all(&mut *self.db).await?;

        Ok(files)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM files");
        push_where(&mut query, filter.filter.as_ref());

        let total = query.build_query_scalar::<i64>().fetch_one(&mut *self.db).await?;

        Ok(total)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: &Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the record with this id, inserting it if it has disappeared
    /// in the meantime (last write wins).
    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: &Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let file = sqlx::query_as::<_, FileDBResponse>(
            r#"
            INSERT INTO files (id, name, size, tags)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                size = EXCLUDED.size,
                tags = EXCLUDED.tags,
                updated_at = NOW()
            RETURNING id, name, size, tags, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(request.size)
        .bind(&request.tags)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::{PageRequest, build_query};
    use sqlx::{Execute, PgPool};

    fn create_request(name: &str, tags: &[&str]) -> FileCreateDBRequest {
        FileCreateDBRequest {
            name: name.to_string(),
            size: 0,
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sql_for(filter: &Filter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM files");
        push_where(&mut builder, Some(filter));
        builder.build().sql().to_string()
    }

    #[test]
    fn test_tag_conjunction_sql() {
        let tags = vec!["tag1".to_string(), "tag2".to_string()];
        let query = build_query(Some(tags.as_slice()), Some("name"), PageRequest::new(0, 10));
        assert_eq!(
            sql_for(query.filter.as_ref().unwrap()),
            "SELECT 1 FROM files WHERE (($1 = ANY(tags) AND $2 = ANY(tags)) AND strpos(name, $3) > 0)"
        );
    }

    #[test]
    fn test_name_only_sql() {
        assert_eq!(
            sql_for(&Filter::NameContains("name1".to_string())),
            "SELECT 1 FROM files WHERE strpos(name, $1) > 0"
        );
    }

    #[test]
    fn test_empty_conjunction_sql() {
        assert_eq!(sql_for(&Filter::All(vec![])), "SELECT 1 FROM files WHERE TRUE");
    }

    #[sqlx::test]
    async fn test_create_get_delete(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Files::new(&mut conn);

        let created = repo.create(&create_request("file1.txt", &["text"])).await.unwrap();
        assert!(!created.id.is_empty());
        assert!(repo.exists(&created.id).await.unwrap());

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "file1.txt");
        assert_eq!(fetched.tags, vec!["text".to_string()]);

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    async fn test_update_overwrites_tags(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Files::new(&mut conn);

        let created = repo.create(&create_request("name", &["x"])).await.unwrap();
        let updated = repo
            .update(
                &created.id,
                &FileUpdateDBRequest {
                    name: created.name.clone(),
                    size: created.size,
                    tags: vec!["a".to_string(), "b".to_string()],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[sqlx::test]
    async fn test_search_by_tags_and_name(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Files::new(&mut conn);

        repo.create(&create_request("name.mp3", &[])).await.unwrap();
        repo.create(&create_request("nam1.vid", &["yo"])).await.unwrap();
        repo.create(&create_request("yolo.name0.txt", &["yo", "document"])).await.unwrap();
        repo.create(&create_request("yolo.name1.doc", &["yo", "document"])).await.unwrap();
        repo.create(&create_request("yolo.name2.doc", &["yo", "documents"])).await.unwrap();

        let tags = vec!["document".to_string(), "yo".to_string()];
        let query = build_query(Some(tags.as_slice()), Some("name"), PageRequest::new(0, 1));

        assert_eq!(repo.count(&query).await.unwrap(), 2);
        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "yolo.name0.txt");

        let next = build_query(Some(tags.as_slice()), Some("name"), PageRequest::new(1, 1));
        let page = repo.list(&next).await.unwrap();
        assert_eq!(page[0].name, "yolo.name1.doc");
    }

    #[sqlx::test]
    async fn test_negative_size_rejected_by_schema(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Files::new(&mut conn);

        let mut request = create_request("a.txt", &[]);
        request.size = -1;
        let err = repo.create(&request).await.unwrap_err();
        assert!(matches!(err, crate::db::errors::DbError::CheckViolation { .. }));
    }
}
