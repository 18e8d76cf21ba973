//! SeaORM entity definitions

pub mod application;

pub mod prelude {
    pub use super::application::Entity as Application;
}
