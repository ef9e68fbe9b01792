mod home;
pub use home::Home;

mod login;
pub use login::{Login, ProviderLink, Register};

mod secrets;
pub use secrets::{Secrets, Submit};

mod status;
pub use status::{ErrorPage, FailedLogin, FailedRegister, NotFound};
