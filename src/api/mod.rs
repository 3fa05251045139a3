pub mod adocao;
pub mod adotante;
pub mod auth;
pub mod error;
pub mod extract;
pub mod pet;
