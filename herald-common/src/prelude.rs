#[rustfmt::skip]
pub use crate::exception::{ErrorCode, TegResult};
pub use crate::{fmt_err, str_err};

#[rustfmt::skip]
// std
pub use std::collections::{BTreeMap, HashMap};
pub use std::ops::ControlFlow;
pub use std::sync::Arc;

#[rustfmt::skip]
pub type InlineStr = smartstring::SmartString<smartstring::Compact>;
pub use lazy_static::lazy_static;
pub use parking_lot::Mutex;

#[rustfmt::skip]
pub use log::{debug, error, info, trace, warn};

#[rustfmt::skip]
pub use crate::common::Object;
