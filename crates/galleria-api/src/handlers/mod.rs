pub mod calc;
pub mod images;
