pub mod adocao;
pub mod adotante;
pub mod pet;
pub mod usuario;

pub use adocao::Entity as Adocao;
pub use adotante::Entity as Adotante;
pub use pet::Entity as Pet;
pub use usuario::Entity as Usuario;
