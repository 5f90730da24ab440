pub mod cart;
pub mod category;
pub mod course;
pub mod user;
pub mod wishlist;

pub use cart::{CartItem, NewCartItem};
pub use category::{Category, CategoryInput};
pub use course::{Course, CourseInput};
pub use user::{NewUser, ProfileUpdate, User};
pub use wishlist::WishlistItem;
