mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod shell;
pub use shell::Shell;

mod home;
pub use home::Home;

mod detect;
pub use detect::Detect;

mod about;
pub use about::About;

mod profile;
pub use profile::Profile;
