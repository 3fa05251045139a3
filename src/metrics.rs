use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use crate::entities::{pet, pet::PetStatus, Adocao, Adotante, Pet};

/// Row counts backing the gauges. `None` means the count query failed and
/// the gauge keeps its previous value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub pets: Option<u64>,
    pub pets_adopted: Option<u64>,
    pub adotantes: Option<u64>,
    pub adocoes: Option<u64>,
}

fn logged(table: &str, result: Result<u64, DbErr>) -> Option<u64> {
    result
        .map_err(|e| tracing::warn!(table, error = %e, "failed to count rows for metrics"))
        .ok()
}

impl TableCounts {
    pub async fn load(db: &DatabaseConnection) -> Self {
        let pets = logged("pets", Pet::find().count(db).await);
        let pets_adopted = logged(
            "pets",
            Pet::find()
                .filter(pet::Column::Status.eq(PetStatus::Adotado))
                .count(db)
                .await,
        );
        let adotantes = logged("adotantes", Adotante::find().count(db).await);
        let adocoes = logged("adocoes", Adocao::find().count(db).await);

        Self {
            pets,
            pets_adopted,
            adotantes,
            adocoes,
        }
    }

    pub fn apply(&self) {
        let gauges = [
            ("adopet_pets_total", self.pets),
            ("adopet_pets_adopted", self.pets_adopted),
            ("adopet_adotantes_total", self.adotantes),
            ("adopet_adocoes_total", self.adocoes),
        ];
        for (name, count) in gauges {
            if let Some(count) = count {
                metrics::gauge!(name).set(count as f64);
            }
        }
    }
}

/// Seeds the gauges from current table counts.
pub async fn init_metrics(db: &DatabaseConnection) {
    let counts = TableCounts::load(db).await;
    counts.apply();

    tracing::info!(
        "Initialized metrics: Pets={:?}, Adopted={:?}, Adotantes={:?}, Adocoes={:?}",
        counts.pets, counts.pets_adopted, counts.adotantes, counts.adocoes
    );
}

/// Re-reads every gauge after writes whose effect spans tables: deletes
/// that cascade into `adocoes` and direct pet status changes.
pub async fn refresh_gauges(db: &DatabaseConnection) {
    TableCounts::load(db).await.apply();
}

pub fn record_adoption_created() {
    metrics::counter!("adopet_adocoes_created_total").increment(1);
    metrics::gauge!("adopet_adocoes_total").increment(1.0);
    metrics::gauge!("adopet_pets_adopted").increment(1.0);
}

pub fn record_adoption_deleted() {
    metrics::gauge!("adopet_adocoes_total").decrement(1.0);
}

pub fn record_pet_created(status: PetStatus) {
    metrics::gauge!("adopet_pets_total").increment(1.0);
    if status == PetStatus::Adotado {
        metrics::gauge!("adopet_pets_adopted").increment(1.0);
    }
}

pub fn record_adotante_created() {
    metrics::gauge!("adopet_adotantes_total").increment(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn count_row(n: i64) -> Vec<BTreeMap<&'static str, Value>> {
        vec![BTreeMap::from([("num_items", Value::from(n))])]
    }

    #[tokio::test]
    async fn counts_every_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_row(4), count_row(1), count_row(2), count_row(1)])
            .into_connection();

        let counts = TableCounts::load(&db).await;

        assert_eq!(
            counts,
            TableCounts {
                pets: Some(4),
                pets_adopted: Some(1),
                adotantes: Some(2),
                adocoes: Some(1),
            }
        );
    }

    #[tokio::test]
    async fn failed_count_leaves_gauge_alone() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_row(4), count_row(1), count_row(2)])
            .append_query_errors([DbErr::Custom("timeout".into())])
            .into_connection();

        let counts = TableCounts::load(&db).await;

        assert_eq!(counts.adocoes, None);
        assert_eq!(counts.pets, Some(4));
    }

    #[test]
    fn apply_overwrites_drifted_gauges() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            metrics::gauge!("adopet_adocoes_total").set(7.0);
            TableCounts {
                pets: Some(3),
                pets_adopted: Some(0),
                adotantes: Some(2),
                adocoes: Some(0),
            }
            .apply();
        });

        let rendered = handle.render();
        assert!(rendered.contains("adopet_adocoes_total 0"));
        assert!(rendered.contains("adopet_pets_total 3"));
        assert!(rendered.contains("adopet_pets_adopted 0"));
    }
}
