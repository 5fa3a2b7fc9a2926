mod prediction;
mod user;

pub use prediction::PredictionInfo;
pub use user::UserInfo;
