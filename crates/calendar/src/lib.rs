mod error;
mod fetch;
mod grid;
mod holiday;
mod menu;
mod month;
mod series;
mod upstream;
mod view;

pub use error::*;
pub use fetch::*;
pub use grid::*;
pub use holiday::*;
pub use menu::*;
pub use month::*;
pub use series::*;
pub use upstream::*;
pub use view::*;
