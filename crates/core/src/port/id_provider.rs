// ID Provider Port (for deterministic testing)

/// ID provider interface (login `state` nonces; deterministic in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique identifier
    fn generate_id(&self) -> String;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Always returns the same identifier (tests)
pub struct FixedIdProvider(pub String);

impl IdProvider for FixedIdProvider {
    fn generate_id(&self) -> String {
        self.0.clone()
    }
}
