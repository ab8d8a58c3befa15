use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder, SqliteQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr};
use shelter_common::{DogSize, DogStatus};
use tracing::{info, warn};

use crate::entity::{dog, dog_document};
use crate::models::dog::DogInput;
use crate::repository::DogRepository;

/// Example dogs inserted into an empty database.
fn demo_dogs() -> Vec<DogInput> {
    vec![
        DogInput {
            name: "Buddy".into(),
            age: 2,
            size: DogSize::Medium,
            status: DogStatus::Intake,
            kid_friendly: true,
            cat_friendly: false,
            dog_friendly: true,
            notes: Some("Sweet and energetic.".into()),
        },
        DogInput {
            name: "Molly".into(),
            age: 7,
            size: DogSize::Small,
            status: DogStatus::Fostered,
            kid_friendly: true,
            cat_friendly: true,
            dog_friendly: true,
            notes: Some("On thyroid meds.".into()),
        },
        DogInput {
            name: "Zeus".into(),
            age: 4,
            size: DogSize::Large,
            status: DogStatus::Hold,
            kid_friendly: false,
            cat_friendly: false,
            dog_friendly: false,
            notes: Some("Needs decompression.".into()),
        },
    ]
}

/// Insert the demo dogs if the `dogs` table is empty. Returns how many were added.
pub async fn seed_demo_dogs(dogs: &dyn DogRepository) -> Result<usize, DbErr> {
    if dogs.count_dogs().await? > 0 {
        return Ok(0);
    }

    let demo = demo_dogs();
    let count = demo.len();
    for input in demo {
        dogs.create_dog(input, None).await?;
    }
    info!("Seeded {} demo dogs", count);
    Ok(count)
}

/// Ensure the lookup indexes exist.
///
/// Schema sync only creates tables and columns, so secondary indexes are
/// created here. Failures are logged and startup continues.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes: [(&str, IndexCreateStatement); 2] = [
        (
            "idx_dog_documents_dog_id",
            Index::create()
                .if_not_exists()
                .name("idx_dog_documents_dog_id")
                .table(dog_document::Entity)
                .col(dog_document::Column::DogId)
                .to_owned(),
        ),
        (
            "idx_dogs_status_size",
            Index::create()
                .if_not_exists()
                .name("idx_dogs_status_size")
                .table(dog::Entity)
                .col(dog::Column::Status)
                .col(dog::Column::Size)
                .to_owned(),
        ),
    ];

    let backend = db.get_database_backend();
    for (name, index) in indexes {
        let stmt = match backend {
            DatabaseBackend::Sqlite => index.to_string(SqliteQueryBuilder),
            _ => index.to_string(PostgresQueryBuilder),
        };

        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
