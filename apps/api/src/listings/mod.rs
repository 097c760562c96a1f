// Read access to the listings store: the shared filter query, schema
// introspection over whatever columns the CSV provided, and the ad-hoc
// SQL console.

pub mod adhoc;
pub mod filter;
pub mod handlers;
pub mod schema;
