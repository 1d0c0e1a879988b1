mod error;
mod import;
mod login;
mod register;
mod users;

pub use error::ErrorPage;
pub use import::ImportPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use users::UsersPage;
