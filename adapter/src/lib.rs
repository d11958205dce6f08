pub mod database;
pub mod mailer;
pub mod price;
pub mod repository;
