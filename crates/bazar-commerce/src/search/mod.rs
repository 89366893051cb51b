//! Search module.
//!
//! Maps navigation labels to catalog queries and turns results into views.

mod target;
mod view;

pub use target::{SearchTarget, BEST_SELLERS, BEST_SELLER_ID, NEW_RELEASES, SPECIAL_OFFERS};
pub use view::{
    HomeView, SearchView, BEST_SELLERS_HEADING, FEATURED_UNAVAILABLE_MESSAGE, NO_RESULTS_MESSAGE,
    RECOMMENDED_HEADING,
};
