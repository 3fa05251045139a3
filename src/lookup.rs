//! Primary-key existence checks for the entities an adoption refers to.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::entities::{adotante, pet};

/// An entity whose rows can be probed by integer id.
///
/// `Ok(false)` means the row is absent; a failing lookup is returned as
/// `Err` so callers never mistake an outage for a missing row.
#[async_trait]
pub trait Lookup: EntityTrait {
    /// Name used in log lines.
    const KIND: &'static str;

    async fn exists<C>(conn: &C, id: i32) -> Result<bool, DbErr>
    where
        C: ConnectionTrait;
}

macro_rules! impl_lookup {
    ($entity:ty, $kind:literal) => {
        #[async_trait]
        impl Lookup for $entity {
            const KIND: &'static str = $kind;

            async fn exists<C>(conn: &C, id: i32) -> Result<bool, DbErr>
            where
                C: ConnectionTrait,
            {
                let found = <$entity>::find_by_id(id).one(conn).await?.is_some();
                if !found {
                    tracing::debug!(kind = Self::KIND, id, "lookup miss");
                }
                Ok(found)
            }
        }
    };
}

impl_lookup!(pet::Entity, "pet");
impl_lookup!(adotante::Entity, "adotante");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::pet::PetStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn sample_pet() -> pet::Model {
        let now = chrono::Utc::now().naive_utc();
        pet::Model {
            id: 5,
            nome: "Thor".into(),
            especie: "cachorro".into(),
            raca: None,
            idade: Some(3),
            descricao: None,
            status: PetStatus::Disponivel,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn reports_present_and_absent_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_pet()]])
            .append_query_results([Vec::<adotante::Model>::new()])
            .into_connection();

        assert!(pet::Entity::exists(&db, 5).await.unwrap());
        assert!(!adotante::Entity::exists(&db, 1).await.unwrap());
    }

    #[tokio::test]
    async fn lookup_failure_is_an_error_not_a_miss() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();

        assert!(pet::Entity::exists(&db, 5).await.is_err());
    }
}
