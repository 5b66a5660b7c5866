pub mod data;
pub mod dates;
pub mod due;
pub mod helpers;
