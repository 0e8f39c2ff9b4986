pub mod blank;
pub mod numeric;
pub mod validation;

pub use blank::deserialize_blank_as_none;
pub use numeric::{deserialize_lenient_int, deserialize_lenient_opt_int, parse_int_lenient};
pub use validation::ValidatedJson;
