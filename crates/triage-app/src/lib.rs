// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dates;
pub mod error;
pub mod ids;
pub mod locale;
pub mod model;
pub mod priority;
pub mod selection;
pub mod state;
pub mod view;

pub use dates::*;
pub use error::*;
pub use ids::*;
pub use locale::*;
pub use model::*;
pub use priority::*;
pub use selection::*;
pub use state::*;
pub use view::*;
