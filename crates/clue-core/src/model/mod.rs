pub mod card;
pub mod category;
pub mod deal;
pub mod deck;
pub mod mask;
pub mod player;
pub mod suggestion;
pub mod triple;
