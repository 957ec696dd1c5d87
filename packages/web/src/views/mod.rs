mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod home;
pub use home::Home;
