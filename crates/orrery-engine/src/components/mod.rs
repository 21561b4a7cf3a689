pub mod body;
pub mod trail;
