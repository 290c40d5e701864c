/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const SLOTS_ROUTE_COMPONENT: &str = "slots";
pub const SLOTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SLOTS_ROUTE_COMPONENT);

/// Creation-time cap on slots sharing one `created_for_date`.
pub const SLOTS_PER_CREATED_DATE: i64 = 2;
