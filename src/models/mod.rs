pub mod billmodel;
pub mod contractmodel;
pub mod roommodel;
pub mod servicemodel;
pub mod usermodel;
