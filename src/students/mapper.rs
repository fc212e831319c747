//! Stateless conversions between the persisted and transport shapes.
//!
//! Absence is carried by `Option` at the call sites: a missing record is
//! `Option<StudentEntity>` and composes with these functions through
//! `Option::map`.

use crate::students::dto::Student;
use crate::students::repo::StudentEntity;

pub fn to_dto(entity: &StudentEntity) -> Student {
    Student {
        id: entity.id,
        first_name: entity.first_name.clone(),
        last_name: entity.last_name.clone(),
    }
}

pub fn to_entity(student: &Student) -> StudentEntity {
    StudentEntity {
        id: student.id,
        first_name: student.first_name.clone(),
        last_name: student.last_name.clone(),
    }
}

pub fn to_dtos(entities: &[StudentEntity]) -> Vec<Student> {
    entities.iter().map(to_dto).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: Option<i64>, first: &str, last: &str) -> StudentEntity {
        StudentEntity {
            id,
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let student = Student {
            id: Some(7),
            first_name: "Alice".into(),
            last_name: "Smith".into(),
        };
        assert_eq!(to_dto(&to_entity(&student)), student);
    }

    #[test]
    fn round_trip_preserves_absent_id() {
        let student = Student {
            id: None,
            first_name: "Alice".into(),
            last_name: "Smith".into(),
        };
        assert_eq!(to_dto(&to_entity(&student)), student);
    }

    #[test]
    fn absent_record_maps_to_absent_dto() {
        let missing: Option<StudentEntity> = None;
        assert_eq!(missing.as_ref().map(to_dto), None);
    }

    #[test]
    fn empty_list_maps_to_empty_list() {
        assert!(to_dtos(&[]).is_empty());
    }

    #[test]
    fn list_conversion_preserves_order() {
        let entities = vec![
            entity(Some(1), "Alice", "Smith"),
            entity(Some(2), "Bob", "Johnson"),
        ];
        let dtos = to_dtos(&entities);
        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0], to_dto(&entities[0]));
        assert_eq!(dtos[1], to_dto(&entities[1]));
    }
}
