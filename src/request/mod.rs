//! Request generation: templates + server URL + resolved values become
//! concrete, dispatchable requests.
mod generate;
mod types;
mod values;


pub use generate::{generate, generate_all};
pub use types::{HeaderValue, HttpMethod, RequestBody, SerializedRequest, SerializedResponse};
pub use values::ValueSource;
