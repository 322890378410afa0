pub mod aggregation_utils;
pub mod genre_utils;
