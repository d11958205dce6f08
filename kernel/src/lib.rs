pub mod assembler;
pub mod collaborator;
pub mod ledger;
pub mod model;
pub mod repository;
