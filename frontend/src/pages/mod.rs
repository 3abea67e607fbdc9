pub mod dashboard;
pub mod farms;
pub mod login;
pub mod ndvi;
pub mod profile;
pub mod signup;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use signup::SignupPage;
