mod state;
mod view_model;

pub use state::{MoviesState, PageInfo, SortOption, PAGINATION_OFFSET};
pub use view_model::{MoviesInput, MoviesOutput, MoviesRoute, MoviesViewModel};
