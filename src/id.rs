//! Identifier generation for every persisted entity.

use uuid::Uuid;

/// Produce a fresh, globally unique identifier.
///
/// Habits, tags, completion entries and associations all draw their ids from here.
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_non_nil() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
        assert!(!a.is_nil());
        assert_eq!(a.get_version_num(), 4);
    }
}
