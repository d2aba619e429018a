//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Employee ID (unique login identifier).
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Job designation.
    pub designation: String,
    /// Department.
    pub department: String,
    /// Contact number.
    pub cell_no: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Argon2id PHC password hash.
    pub password_hash: String,
    /// Initial role.
    pub role: UserRole,
    /// Initial approval flag. Self-registrations start unapproved.
    pub is_approved: bool,
}

/// User repository for CRUD and approval-workflow operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a user by employee ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_emp_id(&self, emp_id: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::EmpId.eq(emp_id))
            .one(&self.db)
            .await
    }

    /// Checks whether a user already exists with the given employee ID, or
    /// with the given email when one is supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn identity_exists(
        &self,
        emp_id: &str,
        email: Option<&str>,
    ) -> Result<bool, DbErr> {
        let mut condition = Condition::any().add(users::Column::EmpId.eq(emp_id));
        if let Some(email) = email {
            condition = condition.add(users::Column::Email.eq(email));
        }

        let count = users::Entity::find()
            .filter(condition)
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: NewUser) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            emp_id: Set(input.emp_id),
            name: Set(input.name),
            designation: Set(input.designation),
            department: Set(input.department),
            cell_no: Set(input.cell_no),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            role: Set(input.role),
            is_approved: Set(input.is_approved),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Lists users awaiting approval, oldest registration first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::IsApproved.eq(false))
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Marks a user as approved and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails, including when no row
    /// with the given ID exists.
    pub async fn set_approved(&self, id: Uuid) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            id: Set(id),
            is_approved: Set(true),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        user.update(&self.db).await
    }

    /// Replaces a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DbErr> {
        let user = users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_string()),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        user.update(&self.db).await?;
        Ok(())
    }
}
