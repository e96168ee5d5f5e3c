use crate::database::entities::reports;
use async_trait::async_trait;
use domain::DomainError;
use domain::report::{DEFAULT_STATUS, Report, ReportRepository};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

// Keep the stored remark when the incoming one is empty
const MERGE_REMARK_SQL: &str = r#"CASE WHEN "excluded"."remark" = '' THEN "reports"."remark" ELSE "excluded"."remark" END"#;

pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_report(model: reports::Model) -> Report {
        Report {
            id: model.id,
            loop_id: model.loop_id,
            section: model.section,
            status: model.status,
            assigned: model.assigned,
            remark: model.remark,
            timestamp: model.timestamp,
        }
    }

    fn store_error(e: DbErr) -> DomainError {
        DomainError::Store(e.to_string())
    }
}

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn find_all(&self) -> Result<Vec<Report>, DomainError> {
        let models = reports::Entity::find()
            .all(&self.db)
            .await
            .map_err(Self::store_error)?;

        Ok(models.into_iter().map(Self::model_to_report).collect())
    }

    async fn find_by_key(
        &self,
        loop_id: &str,
        section: &str,
    ) -> Result<Option<Report>, DomainError> {
        let model = reports::Entity::find()
            .filter(reports::Column::LoopId.eq(loop_id))
            .filter(reports::Column::Section.eq(section))
            .one(&self.db)
            .await
            .map_err(Self::store_error)?;

        Ok(model.map(Self::model_to_report))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Report>, DomainError> {
        let model = reports::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(Self::store_error)?;

        Ok(model.map(Self::model_to_report))
    }

    async fn upsert(&self, candidate: Report) -> Result<Report, DomainError> {
        let active_model = reports::ActiveModel {
            id: Set(candidate.id),
            loop_id: Set(candidate.loop_id),
            section: Set(candidate.section),
            status: Set(candidate.status),
            assigned: Set(candidate.assigned),
            remark: Set(candidate.remark),
            timestamp: Set(candidate.timestamp),
        };

        // Single statement: the unique (loop, section) index decides between
        // insert and update, and the existing id is never touched.
        let model = reports::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([reports::Column::LoopId, reports::Column::Section])
                    .update_columns([
                        reports::Column::Status,
                        reports::Column::Assigned,
                        reports::Column::Timestamp,
                    ])
                    .value(reports::Column::Remark, Expr::cust(MERGE_REMARK_SQL))
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(Self::store_error)?;

        Ok(Self::model_to_report(model))
    }

    async fn resolve(&self, id: &str, timestamp: &str) -> Result<Option<Report>, DomainError> {
        // No returned row means no record has this id
        let models = reports::Entity::update_many()
            .col_expr(reports::Column::Status, Expr::value(DEFAULT_STATUS))
            .col_expr(reports::Column::Remark, Expr::value(""))
            .col_expr(reports::Column::Timestamp, Expr::value(timestamp))
            .filter(reports::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(Self::store_error)?;

        Ok(models.into_iter().next().map(Self::model_to_report))
    }
}
