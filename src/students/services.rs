use std::sync::Arc;

use crate::error::ApiError;
use crate::students::dto::Student;
use crate::students::mapper;
use crate::students::repo::StudentRepo;

/// Orchestrates repository calls and mapping. The only business rules live
/// here: existence checks and the partial-update semantics.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepo>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, ApiError> {
        let entity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(id))?;
        Ok(mapper::to_dto(&entity))
    }

    pub async fn get_students(&self) -> Result<Vec<Student>, ApiError> {
        let entities = self.repo.find_all().await?;
        Ok(mapper::to_dtos(&entities))
    }

    pub async fn create_student(&self, student: Student) -> Result<Student, ApiError> {
        let mut entity = mapper::to_entity(&student);
        // Any client-supplied id is ignored; the store assigns one on insert.
        entity.id = None;
        let saved = self.repo.save(entity).await?;
        Ok(mapper::to_dto(&saved))
    }

    pub async fn update_student(&self, id: i64, student: Student) -> Result<Student, ApiError> {
        let mut existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(id))?;
        // Partial overwrite: names only, the stored id never changes.
        existing.first_name = student.first_name;
        existing.last_name = student.last_name;
        let saved = self.repo.save(existing).await?;
        Ok(mapper::to_dto(&saved))
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), ApiError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ApiError::NotFound(id));
        }
        self.repo.delete_by_id(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::students::repo::InMemoryStudentRepo;

    fn service() -> StudentService {
        StudentService::new(Arc::new(InMemoryStudentRepo::default()))
    }

    fn student(id: Option<i64>, first: &str, last: &str) -> Student {
        Student {
            id,
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_get_returns_it() {
        let svc = service();
        let created = svc
            .create_student(student(None, "Alice", "Smith"))
            .await
            .unwrap();
        assert_eq!(created.id, Some(1));

        let fetched = svc.get_student(1).await.unwrap();
        assert_eq!(fetched, student(Some(1), "Alice", "Smith"));
    }

    #[tokio::test]
    async fn create_ignores_supplied_id() {
        let svc = service();
        let created = svc
            .create_student(student(Some(42), "Charlie", "Brown"))
            .await
            .unwrap();
        assert_eq!(created.id, Some(1));
    }

    #[tokio::test]
    async fn get_missing_student_is_not_found() {
        let svc = service();
        let err = svc.get_student(404).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(404)));
    }

    #[tokio::test]
    async fn list_returns_all_in_order() {
        let svc = service();
        svc.create_student(student(None, "Alice", "Smith"))
            .await
            .unwrap();
        svc.create_student(student(None, "Bob", "Johnson"))
            .await
            .unwrap();

        let all = svc.get_students().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].first_name, "Alice");
        assert_eq!(all[1].first_name, "Bob");
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() {
        let svc = service();
        assert!(svc.get_students().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_names_only() {
        let svc = service();
        svc.create_student(student(None, "David", "Lee"))
            .await
            .unwrap();

        let updated = svc
            .update_student(1, student(Some(99), "DavidUpdated", "LeeUpdated"))
            .await
            .unwrap();
        // The path id wins over the body id.
        assert_eq!(updated, student(Some(1), "DavidUpdated", "LeeUpdated"));

        let fetched = svc.get_student(1).await.unwrap();
        assert_eq!(fetched.id, Some(1));
        assert_eq!(fetched.first_name, "DavidUpdated");
    }

    #[tokio::test]
    async fn update_missing_student_is_not_found() {
        let svc = service();
        let err = svc
            .update_student(3, student(None, "A", "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(3)));
    }

    #[tokio::test]
    async fn delete_removes_student() {
        let svc = service();
        svc.create_student(student(None, "Alice", "Smith"))
            .await
            .unwrap();

        svc.delete_student(1).await.unwrap();
        assert!(matches!(
            svc.get_student(1).await.unwrap_err(),
            ApiError::NotFound(1)
        ));
    }

    #[tokio::test]
    async fn delete_is_not_idempotent() {
        let svc = service();
        svc.create_student(student(None, "Alice", "Smith"))
            .await
            .unwrap();
        svc.delete_student(1).await.unwrap();

        let err = svc.delete_student(1).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(1)));
    }

    #[tokio::test]
    async fn delete_missing_student_is_not_found() {
        let svc = service();
        let err = svc.delete_student(4).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(4)));
    }
}
