pub mod fcm;
pub mod validation;
