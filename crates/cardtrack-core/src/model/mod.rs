pub mod card;
pub mod kind;
pub mod player;
pub mod table;
