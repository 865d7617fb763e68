use uuid::Uuid;

/// Random (v4) UUID.
///
/// Primary keys are generated client-side at construction time, before any
/// persistence step, so an entity has a usable identity even when detached.
#[must_use]
pub fn generate_uuid() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::generate_uuid;

    #[test]
    fn generates_random_v4() {
        let id = generate_uuid();
        assert!(!id.is_nil());
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn generates_distinct_ids() {
        assert_ne!(generate_uuid(), generate_uuid());
    }
}
