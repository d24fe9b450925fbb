use crate::error::Result;
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

/// Work that runs once all migrations have been applied.
#[async_trait]
pub trait PostMigrateHook: Send + Sync {
    /// Identifies the hook; registering the same uid twice is a no-op.
    fn dispatch_uid(&self) -> &str;

    async fn run(&self, db: &DatabaseConnection) -> Result<()>;
}

/// Ordered set of post-migration hooks.
#[derive(Default)]
pub struct PostMigrate {
    hooks: Vec<Box<dyn PostMigrateHook>>,
}

impl PostMigrate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook. Returns false when a hook with the same dispatch uid
    /// is already connected.
    pub fn connect(&mut self, hook: impl PostMigrateHook + 'static) -> bool {
        if self
            .hooks
            .iter()
            .any(|h| h.dispatch_uid() == hook.dispatch_uid())
        {
            tracing::debug!("Hook {} already connected", hook.dispatch_uid());
            return false;
        }

        self.hooks.push(Box::new(hook));
        true
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in registration order, stopping at the first error.
    pub async fn dispatch(&self, db: &DatabaseConnection) -> Result<()> {
        for hook in &self.hooks {
            tracing::debug!("Running post-migrate hook {}", hook.dispatch_uid());
            hook.run(db).await?;
        }
        Ok(())
    }
}
