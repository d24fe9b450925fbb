pub mod default_settings;
pub mod prelude;

pub use default_settings::Entity as DefaultSettings;
