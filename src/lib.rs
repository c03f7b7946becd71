pub mod graph;
pub mod cust_error;
pub mod ilp;
pub mod cache;
pub mod helpers;
pub mod bounds;
pub mod oracle;
pub mod search;
pub mod cuts;
pub mod query_instance;
