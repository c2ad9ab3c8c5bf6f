use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{GalleryImage, NewGalleryImage, Tractor, TractorRecord},
        value_objects::{ImageFilename, PhoneNumber, Price},
    },
    ports::repositories::CatalogRepository,
};

const TRACTOR_COLUMNS: &str = "id, created_at, name, price, description, image_url, \
     whatsapp_number, is_available, motor, potencia, tracao, horas_uso, estado, \
     localizacao, ano, single_owner";

const GALLERY_COLUMNS: &str = "id, tractor_id, image_url, sort_order, created_at";

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Database {
            message: err.to_string(),
        }
    }
}

/// SQL-based implementation of CatalogRepository using PostgreSQL
#[derive(Clone)]
pub struct SqlCatalogRepository {
    pool: PgPool,
}

impl SqlCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize database tables. Safe to run on every start
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        // Prepared statements take one command each
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }
}

const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS tractors (
        id UUID PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        name TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        description TEXT NOT NULL,
        image_url TEXT NOT NULL,
        whatsapp_number TEXT NOT NULL,
        is_available BOOLEAN NOT NULL DEFAULT TRUE,
        motor TEXT,
        potencia TEXT,
        tracao TEXT,
        horas_uso INTEGER,
        estado TEXT,
        localizacao TEXT,
        ano INTEGER,
        single_owner BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tractors_created_at ON tractors(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_tractors_available ON tractors(is_available)",
    r#"
    CREATE TABLE IF NOT EXISTS tractor_gallery (
        id UUID PRIMARY KEY,
        tractor_id UUID NOT NULL REFERENCES tractors(id) ON DELETE CASCADE,
        image_url TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tractor_gallery_tractor ON tractor_gallery(tractor_id, sort_order)",
];

fn decode_error(column: &str, message: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Decode {
        message: format!("{}: {}", column, message),
    }
}

fn tractor_from_row(row: &PgRow) -> RepositoryResult<Tractor> {
    let price: f64 = row.try_get("price")?;
    let image_url: String = row.try_get("image_url")?;
    let whatsapp_number: String = row.try_get("whatsapp_number")?;

    Ok(Tractor {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        details: TractorRecord {
            name: row.try_get("name")?,
            price: Price::new(price).ok_or_else(|| decode_error("price", price))?,
            description: row.try_get("description")?,
            image_url: ImageFilename::new(image_url).map_err(|e| decode_error("image_url", e))?,
            whatsapp_number: PhoneNumber::new(whatsapp_number)
                .map_err(|e| decode_error("whatsapp_number", e))?,
            is_available: row.try_get("is_available")?,
            engine: row.try_get("motor")?,
            horsepower: row.try_get("potencia")?,
            drivetrain: row.try_get("tracao")?,
            hours_of_use: row.try_get("horas_uso")?,
            condition: row.try_get("estado")?,
            location: row.try_get("localizacao")?,
            year: row.try_get("ano")?,
            single_owner: row.try_get("single_owner")?,
        },
    })
}

fn gallery_from_row(row: &PgRow) -> RepositoryResult<GalleryImage> {
    let image_url: String = row.try_get("image_url")?;

    Ok(GalleryImage {
        id: row.try_get("id")?,
        tractor_id: row.try_get("tractor_id")?,
        image_url: ImageFilename::new(image_url).map_err(|e| decode_error("image_url", e))?,
        sort_order: row.try_get("sort_order")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl CatalogRepository for SqlCatalogRepository {
    async fn list_available(&self) -> RepositoryResult<Vec<Tractor>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tractors WHERE is_available = TRUE ORDER BY created_at DESC",
            TRACTOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(tractor_from_row).collect()
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Tractor>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tractors ORDER BY created_at DESC",
            TRACTOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(tractor_from_row).collect()
    }

    async fn get(&self, id: Uuid) -> RepositoryResult<Option<Tractor>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tractors WHERE id = $1",
            TRACTOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(tractor_from_row).transpose()
    }

    async fn insert(&self, record: TractorRecord) -> RepositoryResult<Tractor> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO tractors (
                id, name, price, description, image_url, whatsapp_number, is_available,
                motor, potencia, tracao, horas_uso, estado, localizacao, ano, single_owner
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            TRACTOR_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&record.name)
        .bind(record.price.value())
        .bind(&record.description)
        .bind(record.image_url.as_str())
        .bind(record.whatsapp_number.as_str())
        .bind(record.is_available)
        .bind(&record.engine)
        .bind(&record.horsepower)
        .bind(&record.drivetrain)
        .bind(record.hours_of_use)
        .bind(&record.condition)
        .bind(&record.location)
        .bind(record.year)
        .bind(record.single_owner)
        .fetch_one(&self.pool)
        .await?;

        tractor_from_row(&row)
    }

    async fn update(&self, id: Uuid, record: TractorRecord) -> RepositoryResult<Option<Tractor>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE tractors SET
                name = $2, price = $3, description = $4, image_url = $5,
                whatsapp_number = $6, is_available = $7, motor = $8, potencia = $9,
                tracao = $10, horas_uso = $11, estado = $12, localizacao = $13,
                ano = $14, single_owner = $15
            WHERE id = $1
            RETURNING {}
            "#,
            TRACTOR_COLUMNS
        ))
        .bind(id)
        .bind(&record.name)
        .bind(record.price.value())
        .bind(&record.description)
        .bind(record.image_url.as_str())
        .bind(record.whatsapp_number.as_str())
        .bind(record.is_available)
        .bind(&record.engine)
        .bind(&record.horsepower)
        .bind(&record.drivetrain)
        .bind(record.hours_of_use)
        .bind(&record.condition)
        .bind(&record.location)
        .bind(record.year)
        .bind(record.single_owner)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(tractor_from_row).transpose()
    }

    async fn delete_tractor(&self, id: Uuid) -> RepositoryResult<bool> {
        // tractor_gallery rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM tractors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_gallery(&self, tractor_id: Uuid) -> RepositoryResult<Vec<GalleryImage>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tractor_gallery WHERE tractor_id = $1 ORDER BY sort_order ASC, created_at ASC",
            GALLERY_COLUMNS
        ))
        .bind(tractor_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(gallery_from_row).collect()
    }

    async fn insert_gallery_batch(
        &self,
        rows: Vec<NewGalleryImage>,
    ) -> RepositoryResult<Vec<GalleryImage>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(rows.len());

        for new_image in rows {
            let row = sqlx::query(&format!(
                r#"
                INSERT INTO tractor_gallery (id, tractor_id, image_url, sort_order)
                VALUES ($1, $2, $3, $4)
                RETURNING {}
                "#,
                GALLERY_COLUMNS
            ))
            .bind(Uuid::new_v4())
            .bind(new_image.tractor_id)
            .bind(new_image.image_url.as_str())
            .bind(new_image.sort_order)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(gallery_from_row(&row)?);
        }

        tx.commit().await?;

        Ok(inserted)
    }

    async fn get_gallery_image(&self, id: Uuid) -> RepositoryResult<Option<GalleryImage>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tractor_gallery WHERE id = $1",
            GALLERY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(gallery_from_row).transpose()
    }

    async fn delete_gallery_image(&self, id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM tractor_gallery WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
