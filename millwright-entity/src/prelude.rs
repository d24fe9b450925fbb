pub use super::default_settings::Entity as DefaultSettings;
