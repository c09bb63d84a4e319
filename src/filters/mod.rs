pub mod audit;
pub mod auth;
pub mod chain;
pub mod paginate;
pub mod sort;

pub use audit::Audit;
pub use auth::{BasicAuthenticate, EmployeeAuthenticate, OrganisationAuthenticate};
pub use chain::{run_chain, ChainConfigError, Filter, FilterChain, FilterInput};
pub use paginate::Paginate;
pub use sort::SortFilter;
