// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod context;
pub mod fields;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod inventory;
pub mod metrics;
pub mod model;
pub mod money;
pub mod mutation;
pub mod record;
pub mod view;

pub use context::*;
pub use filter::{Selector, SelectorValue};
pub use forms::*;
pub use ids::*;
pub use inventory::*;
pub use model::*;
pub use money::*;
pub use record::*;
pub use view::*;
