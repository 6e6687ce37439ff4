//! Loan application repository for database operations.
//!
//! Implements the core `ApplicationRepository` trait using SeaORM.

use chrono::Utc;
use lendy_core::application::{
    ApplicationChanges, ApplicationError, ApplicationRepository, LoanApplication,
    NewLoanApplication, StoredDocument,
};
use lendy_shared::ApplicationId;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::loan_applications;

/// Loan application repository implementation.
#[derive(Debug, Clone)]
pub struct LoanApplicationRepository {
    db: DatabaseConnection,
}

impl LoanApplicationRepository {
    /// Create a new loan application repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ApplicationRepository for LoanApplicationRepository {
    async fn create(&self, input: NewLoanApplication) -> Result<LoanApplication, ApplicationError> {
        let now = Utc::now().into();
        let (document_url, document_name) = split_document(input.document);

        let active_model = loan_applications::ActiveModel {
            id: Set(ApplicationId::new().into_inner()),
            name: Set(input.name),
            email: Set(input.email),
            telephone: Set(input.telephone),
            occupation: Set(input.occupation),
            salary: Set(input.salary),
            document_url: Set(document_url),
            document_name: Set(document_name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ApplicationError::persistence(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn list(&self) -> Result<Vec<LoanApplication>, ApplicationError> {
        let models = loan_applications::Entity::find()
            .order_by_desc(loan_applications::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ApplicationError::persistence(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<LoanApplication>, ApplicationError> {
        let model = loan_applications::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ApplicationError::persistence(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn update(
        &self,
        id: ApplicationId,
        changes: ApplicationChanges,
    ) -> Result<Option<LoanApplication>, ApplicationError> {
        let Some(model) = loan_applications::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ApplicationError::persistence(e.to_string()))?
        else {
            return Ok(None);
        };

        let (document_url, document_name) = split_document(changes.document);
        let mut active_model: loan_applications::ActiveModel = model.into();
        active_model.name = Set(changes.name);
        active_model.email = Set(changes.email);
        active_model.telephone = Set(changes.telephone);
        active_model.occupation = Set(changes.occupation);
        active_model.salary = Set(changes.salary);
        active_model.document_url = Set(document_url);
        active_model.document_name = Set(document_name);
        active_model.updated_at = Set(changes.updated_at.into());

        match active_model.update(&self.db).await {
            Ok(model) => Ok(Some(to_domain(model))),
            // Deleted between the lookup and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ApplicationError::persistence(e.to_string())),
        }
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationError> {
        let result = loan_applications::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| ApplicationError::persistence(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Flatten an optional document into its stored column pair.
fn split_document(document: Option<StoredDocument>) -> (String, String) {
    document.map_or_else(|| (String::new(), String::new()), |d| (d.url, d.name))
}

/// Convert database model to domain model.
fn to_domain(model: loan_applications::Model) -> LoanApplication {
    LoanApplication {
        id: ApplicationId::from_uuid(model.id),
        name: model.name,
        email: model.email,
        telephone: model.telephone,
        occupation: model.occupation,
        salary: model.salary,
        document_url: model.document_url,
        document_name: model.document_name,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
