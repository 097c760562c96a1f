// Aggregated views over the filtered listing set: skill demand counts, the
// Python mention trend, and top locations/companies/title words.
// Every aggregate works from the same filtered rows the table view shows.

pub mod aggregates;
pub mod handlers;
pub mod skills;
pub mod trend;
