pub mod category;
pub mod item;
pub mod user;

pub use category::{Category, CategoryCreate};
pub use item::{Item, ItemCreate, ItemDetails, ItemResponse};
pub use user::{User, UserCreate, UserResponse};
