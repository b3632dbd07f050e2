use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A lookup by id or composite key matched nothing.
    #[error("{entity} with {} not found", describe_keys(.keys))]
    NotFound {
        entity: &'static str,
        keys: Vec<(&'static str, i64)>,
    },
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, keys: vec![("id", id)] }
    }

    pub fn not_found_by(entity: &'static str, keys: &[(&'static str, i64)]) -> Self {
        Self::NotFound { entity, keys: keys.to_vec() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn describe_keys(keys: &[(&'static str, i64)]) -> String {
    keys.iter()
        .map(|(name, value)| format!("{name} {value}"))
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_by_id_message() {
        let e = ServiceError::not_found("Commons", 7);
        assert_eq!(e.to_string(), "Commons with id 7 not found");
        assert!(e.is_not_found());
    }

    #[test]
    fn not_found_by_composite_key_message() {
        let e = ServiceError::not_found_by("UserCommons", &[("commonsId", 1), ("userId", 2)]);
        assert_eq!(e.to_string(), "UserCommons with commonsId 1 and userId 2 not found");
    }

    #[test]
    fn db_error_is_not_not_found() {
        assert!(!ServiceError::Db("boom".into()).is_not_found());
    }
}
