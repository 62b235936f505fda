mod model;

pub use model::{MockGenerativeModel, MockResult};
